//! Frame painting - fills a FrameBuffer from an engine frame.
//!
//! Three panels, each clipped to its region:
//!
//! - **stats**: elapsed time, comparisons, memory accesses, status line
//! - **bars**: one bar per element, scaled to the buffer's max value
//! - **legend**: algorithm keys and commands, selected algorithm marked
//!
//! When there are more elements than bar columns, each column shows the
//! first element of its slice and lights up if any element in the slice
//! is highlighted.

use crate::engine::{AlgorithmId, Frame};
use crate::renderer::FrameBuffer;
use crate::state::legend;
use crate::types::{Attr, ClipRect, Rgba};

use super::layout::Regions;

/// Color of the first highlighted index.
pub const HIGHLIGHT_A: Rgba = Rgba::RED;
/// Color of the second highlighted index.
pub const HIGHLIGHT_B: Rgba = Rgba::GREEN;
/// Color of every other bar.
pub const BAR_COLOR: Rgba = Rgba::WHITE;

/// Paint `frame` into `buffer`. The buffer is cleared first.
pub fn paint_frame(buffer: &mut FrameBuffer, regions: &Regions, frame: &Frame<'_>, status: &str) {
    buffer.clear();
    paint_stats(buffer, &regions.stats, frame, status);
    paint_bars(buffer, &regions.bars, frame);
    paint_legend(buffer, &regions.legend, frame.selected);
}

/// The four stats panel lines.
pub fn stats_lines(frame: &Frame<'_>, status: &str) -> [String; 4] {
    [
        format!("Time: {:.3} s", frame.stats.live_elapsed_secs()),
        format!("Comparisons: {}", frame.stats.comparisons()),
        format!("Memory accesses: {}", frame.stats.memory_accesses()),
        status.to_string(),
    ]
}

fn paint_stats(buffer: &mut FrameBuffer, rect: &ClipRect, frame: &Frame<'_>, status: &str) {
    for (row, line) in stats_lines(frame, status).iter().enumerate() {
        let y = rect.y + row as u16;
        if y >= rect.y + rect.height {
            break;
        }
        let fg = if row == 3 { Rgba::YELLOW } else { Rgba::WHITE };
        buffer.draw_text(rect.x, y, line, fg, Attr::NONE, Some(rect));
    }
}

// =============================================================================
// Bars
// =============================================================================

/// Bar height in eighths of a cell for `value` in a region `rows` tall.
pub fn bar_eighths(value: i32, max_value: i32, rows: u16) -> u32 {
    if value <= 0 || max_value <= 0 || rows == 0 {
        return 0;
    }
    let value = value.min(max_value) as u64;
    let scaled = value * rows as u64 * 8 / max_value as u64;
    scaled.max(1) as u32
}

fn bar_color(range: std::ops::Range<usize>, frame: &Frame<'_>) -> Rgba {
    if frame.highlight_a.is_some_and(|i| range.contains(&i)) {
        HIGHLIGHT_A
    } else if frame.highlight_b.is_some_and(|i| range.contains(&i)) {
        HIGHLIGHT_B
    } else {
        BAR_COLOR
    }
}

fn paint_bars(buffer: &mut FrameBuffer, rect: &ClipRect, frame: &Frame<'_>) {
    let values = frame.buffer.values();
    let count = values.len();
    if count == 0 || rect.is_empty() {
        return;
    }

    let bottom = rect.y + rect.height - 1;
    let max_value = frame.buffer.max_value();
    let width = rect.width as usize;

    if count <= width {
        let bar_width = (width / count) as u16;
        for (i, &value) in values.iter().enumerate() {
            let x = rect.x + i as u16 * bar_width;
            let eighths = bar_eighths(value, max_value, rect.height);
            buffer.draw_bar(x, bottom, bar_width, eighths, bar_color(i..i + 1, frame), Some(rect));
        }
    } else {
        for col in 0..width {
            let start = col * count / width;
            let end = (col + 1) * count / width;
            let eighths = bar_eighths(values[start], max_value, rect.height);
            let color = bar_color(start..end.max(start + 1), frame);
            buffer.draw_bar(rect.x + col as u16, bottom, 1, eighths, color, Some(rect));
        }
    }
}

// =============================================================================
// Legend
// =============================================================================

fn paint_legend(buffer: &mut FrameBuffer, rect: &ClipRect, selected: Option<AlgorithmId>) {
    buffer.draw_text(rect.x, rect.y, "Keys", Rgba::GRAY, Attr::UNDERLINE, Some(rect));

    for (row, line) in legend().iter().enumerate() {
        let y = rect.y + 1 + row as u16;
        let is_selected = selected.is_some_and(|id| line.starts_with(id.key()));
        let (marker, fg, attrs) = if is_selected {
            ("> ", Rgba::YELLOW, Attr::BOLD)
        } else {
            ("  ", Rgba::WHITE, Attr::NONE)
        };
        let used = buffer.draw_text(rect.x, y, marker, fg, attrs, Some(rect));
        buffer.draw_text(rect.x + used, y, line, fg, attrs, Some(rect));
    }
}

// =============================================================================
// Tests
// =============================================================================
