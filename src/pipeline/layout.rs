//! Screen layout - regions computed with Taffy flexbox.
//!
//! ```text
//! row ─┬─ column (grow) ─┬─ stats  (4 rows)
//!      │                 └─ bars   (grow)
//!      └─ legend (24 cols)
//! ```
//!
//! Taffy reports each node's location relative to its parent; the regions
//! returned here are absolute screen rectangles.

use spark_signals::{derived, Derived};
use taffy::{
    AvailableSpace, Dimension, FlexDirection, LengthPercentage, NodeId, Rect, Size, Style,
    TaffyTree,
};

use super::terminal::{terminal_height_signal, terminal_width_signal};
use crate::error::{Error, Result};
use crate::types::ClipRect;

/// Height of the stats panel (three counters and the status line).
pub const STATS_ROWS: u16 = 4;

/// Width of the legend column.
pub const LEGEND_COLS: u16 = 24;

/// Absolute screen rectangles for each panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Regions {
    pub stats: ClipRect,
    pub bars: ClipRect,
    pub legend: ClipRect,
}

/// Compute the panel regions for a `width` x `height` terminal.
pub fn compute_regions(width: u16, height: u16) -> Result<Regions> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let stats = tree
        .new_leaf(Style {
            size: Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Length(STATS_ROWS as f32),
            },
            flex_shrink: 0.0,
            ..Style::default()
        })
        .map_err(layout_error)?;

    let bars = tree
        .new_leaf(Style {
            flex_grow: 1.0,
            size: Size {
                width: Dimension::Percent(1.0),
                height: Dimension::Auto,
            },
            ..Style::default()
        })
        .map_err(layout_error)?;

    let column = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Column,
                flex_grow: 1.0,
                padding: Rect {
                    top: LengthPercentage::Length(0.0),
                    right: LengthPercentage::Length(1.0),
                    bottom: LengthPercentage::Length(0.0),
                    left: LengthPercentage::Length(1.0),
                },
                ..Style::default()
            },
            &[stats, bars],
        )
        .map_err(layout_error)?;

    let legend = tree
        .new_leaf(Style {
            size: Size {
                width: Dimension::Length(LEGEND_COLS as f32),
                height: Dimension::Percent(1.0),
            },
            flex_shrink: 0.0,
            ..Style::default()
        })
        .map_err(layout_error)?;

    let root = tree
        .new_with_children(
            Style {
                flex_direction: FlexDirection::Row,
                size: Size {
                    width: Dimension::Length(width as f32),
                    height: Dimension::Length(height as f32),
                },
                ..Style::default()
            },
            &[column, legend],
        )
        .map_err(layout_error)?;

    let available = Size {
        width: AvailableSpace::Definite(width as f32),
        height: AvailableSpace::Definite(height as f32),
    };
    tree.compute_layout(root, available).map_err(layout_error)?;

    let bounds = ClipRect::new(0, 0, width, height);
    let origin = (0, 0);
    let column_origin = offset(&tree, column, origin)?;

    Ok(Regions {
        stats: rect(&tree, stats, column_origin, &bounds)?,
        bars: rect(&tree, bars, column_origin, &bounds)?,
        legend: rect(&tree, legend, origin, &bounds)?,
    })
}

/// Regions that follow the terminal size signals.
///
/// Layout errors are carried as strings so the value stays comparable.
pub fn create_regions_derived()
-> Derived<std::result::Result<Regions, String>, impl Fn() -> std::result::Result<Regions, String>> {
    let width = terminal_width_signal();
    let height = terminal_height_signal();

    derived(move || compute_regions(width.get(), height.get()).map_err(|e| e.to_string()))
}

// =============================================================================
// Helpers
// =============================================================================

fn layout_error(err: taffy::TaffyError) -> Error {
    Error::Layout(err.to_string())
}

/// Absolute position of `node`, given its parent's absolute position.
fn offset(tree: &TaffyTree<()>, node: NodeId, parent: (u16, u16)) -> Result<(u16, u16)> {
    let layout = tree.layout(node).map_err(layout_error)?;
    Ok((
        parent.0.saturating_add(layout.location.x.round() as u16),
        parent.1.saturating_add(layout.location.y.round() as u16),
    ))
}

fn rect(tree: &TaffyTree<()>, node: NodeId, parent: (u16, u16), bounds: &ClipRect) -> Result<ClipRect> {
    let (x, y) = offset(tree, node, parent)?;
    let layout = tree.layout(node).map_err(layout_error)?;
    let r = ClipRect::new(
        x,
        y,
        layout.size.width.round() as u16,
        layout.size.height.round() as u16,
    );
    Ok(r.intersect(bounds).unwrap_or_default())
}

// =============================================================================
// Tests
// =============================================================================
