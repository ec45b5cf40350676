//! Output buffering and stateful cell rendering.
//!
//! These components keep terminal output small:
//! - Batching writes into a single syscall
//! - Tracking terminal state to avoid redundant escape codes
//! - Only emitting changes (colors, attributes, cursor position)

use crate::types::{Attr, Cell, Rgba};
use std::io::{self, Write};

use super::ansi;

// =============================================================================
// OutputBuffer
// =============================================================================

/// A buffer that accumulates output for batch writing.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear the buffer without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    #[inline]
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        let s = c.encode_utf8(&mut buf);
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a unicode codepoint. Invalid codepoints are dropped.
    #[inline]
    pub fn write_codepoint(&mut self, cp: u32) {
        if let Some(c) = char::from_u32(cp) {
            self.write_char(c);
        }
    }

    /// Write everything to `writer` and flush it, then clear.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }

    /// The accumulated data as a string (lossy).
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Renders cells while tracking terminal state to minimize output.
///
/// Tracks the last cursor position, colors and attributes, and only emits
/// escape codes for state that changed.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget all tracked state. Call at the start of each frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Render a single cell to the output buffer.
    pub fn render_cell(&mut self, output: &mut OutputBuffer, x: u16, y: u16, cell: &Cell) -> io::Result<()> {
        // Cursor movement (only if not sequential)
        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            ansi::cursor_to(output, x, y)?;
        }

        if cell.attrs != self.last_attrs {
            ansi::reset(output)?;
            ansi::attrs(output, cell.attrs)?;
            // Colors must be re-sent after a reset
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(output, cell.fg)?;
            self.last_fg = Some(cell.fg);
        }

        if self.last_bg != Some(cell.bg) {
            ansi::bg(output, cell.bg)?;
            self.last_bg = Some(cell.bg);
        }

        output.write_codepoint(cell.char);

        self.last_x = x as i32;
        self.last_y = y as i32;
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(c: char) -> Cell {
        Cell {
            char: c as u32,
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
            attrs: Attr::NONE,
        }
    }

    #[test]
    fn test_output_buffer_write() {
        let mut buf = OutputBuffer::new();
        buf.write_str("hello");
        buf.write_char(' ');
        buf.write_codepoint('w' as u32);
        assert_eq!(buf.as_str().as_ref(), "hello w");
    }

    #[test]
    fn test_flush_to_clears() {
        let mut buf = OutputBuffer::new();
        buf.write_str("test");
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"test");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_stateful_renderer_skips_sequential() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        renderer.render_cell(&mut output, 0, 0, &cell('A')).unwrap();
        let first_len = output.len();

        output.clear();
        renderer.render_cell(&mut output, 1, 0, &cell('B')).unwrap();

        // No cursor move, no color change
        assert_eq!(output.as_str().as_ref(), "B");
        assert!(output.len() < first_len);
    }

    #[test]
    fn test_stateful_renderer_moves_on_gap() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        renderer.render_cell(&mut output, 0, 0, &cell('A')).unwrap();
        output.clear();
        renderer.render_cell(&mut output, 5, 2, &cell('A')).unwrap();

        assert_eq!(output.as_str().as_ref(), "\x1b[3;6HA");
    }

    #[test]
    fn test_attr_change_resends_colors() {
        let mut renderer = StatefulCellRenderer::new();
        let mut output = OutputBuffer::new();

        renderer.render_cell(&mut output, 0, 0, &cell('A')).unwrap();
        output.clear();
        let bold = Cell { attrs: Attr::BOLD, ..cell('B') };
        renderer.render_cell(&mut output, 1, 0, &bold).unwrap();

        let out = output.as_str();
        assert!(out.starts_with("\x1b[0m\x1b[1m"));
        assert!(out.contains("\x1b[38;2;255;255;255m"));
        assert!(out.ends_with('B'));
    }
}
