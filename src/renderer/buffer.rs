//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is a 2D grid of Cells that represents what should be displayed
//! on the terminal. All drawing operations work on this buffer.
//!
//! # Design Decisions
//!
//! - **Flat storage**: Uses `Vec<Cell>` with row-major indexing for cache efficiency.
//! - **Clipping**: Drawing functions accept an optional `ClipRect` so a region
//!   never paints into its neighbours.
//! - **Alpha blending**: Transparent backgrounds blend with existing cells.

use crate::types::{Attr, Cell, ClipRect, Rgba};

/// Partial blocks for bar tops, from 1/8 to 8/8 of a cell.
const EIGHTHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds as a ClipRect.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    /// Get a cell reference (returns None if out of bounds).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Raw cells slice, row-major.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let x = (i % width) as u16;
            let y = (i / width) as u16;
            (x, y, cell)
        })
    }

    /// Clear the entire buffer to default cells.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize the buffer (clears content).
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.resize(width as usize * height as usize, Cell::default());
        self.clear();
    }

    /// The text of row `y`, for tests and debugging.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter_map(|cell| char::from_u32(cell.char))
            .collect()
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        char: u32,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];

        // Alpha blend background if not opaque
        let blended_bg = if bg.is_opaque() || bg.is_terminal_default() {
            bg
        } else {
            Rgba::blend(bg, cell.bg)
        };

        cell.char = char;
        cell.fg = fg;
        cell.bg = blended_bg;
        cell.attrs = attrs;

        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(&mut self, rect: ClipRect, bg: Rgba, clip: Option<&ClipRect>) {
        let rect = match clip {
            Some(clip) => match rect.intersect(clip) {
                Some(r) => r,
                None => return,
            },
            None => rect,
        };
        let Some(rect) = rect.intersect(&self.bounds()) else {
            return;
        };

        let opaque = bg.is_opaque() || bg.is_terminal_default();
        for row in rect.y..rect.y + rect.height {
            let start = self.index(rect.x, row);
            let end = start + rect.width as usize;
            for cell in &mut self.cells[start..end] {
                cell.bg = if opaque { bg } else { Rgba::blend(bg, cell.bg) };
                cell.char = b' ' as u32;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used.
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            if char_width(ch) == 0 {
                continue;
            }
            self.set_cell(col, y, ch as u32, fg, Rgba::TRANSPARENT, attrs, clip);
            col += 1;
        }
        col - x
    }

    /// Draw a vertical bar standing on row `bottom`.
    ///
    /// `eighths` is the bar height in eighths of a cell; the top cell uses a
    /// partial block. Each of the `width` columns gets the same bar.
    pub fn draw_bar(
        &mut self,
        x: u16,
        bottom: u16,
        width: u16,
        eighths: u32,
        fg: Rgba,
        clip: Option<&ClipRect>,
    ) {
        let full = eighths / 8;
        let rem = eighths % 8;

        for col in x..x.saturating_add(width) {
            for i in 0..full {
                let Some(row) = bottom.checked_sub(i as u16) else { break };
                self.set_cell(col, row, '█' as u32, fg, Rgba::TRANSPARENT, Attr::NONE, clip);
            }
            if rem > 0 {
                if let Some(row) = bottom.checked_sub(full as u16) {
                    let ch = EIGHTHS[rem as usize - 1];
                    self.set_cell(col, row, ch as u32, fg, Rgba::TRANSPARENT, Attr::NONE, clip);
                }
            }
        }
    }
}

// =============================================================================
// Text Width Utilities
// =============================================================================

/// Get the display width of a character.
///
/// - Control characters: 0
/// - Everything else: 1 (the screen only shows ASCII and block elements)
pub fn char_width(c: char) -> usize {
    let cp = c as u32;
    if cp < 32 || (0x7F..=0x9F).contains(&cp) { 0 } else { 1 }
}

/// Calculate the display width of a string.
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

// =============================================================================
// Tests
// =============================================================================
