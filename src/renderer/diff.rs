//! Differential renderer for fullscreen mode.
//!
//! The DiffRenderer compares the current frame to the previous frame and only
//! outputs cells that have changed. During a run most steps touch two bars,
//! so this keeps per-step output to a handful of cells.
//!
//! # Algorithm
//!
//! 1. Wrap output in synchronized block (begin_sync/end_sync)
//! 2. For each cell in the new frame:
//!    - If previous frame exists and cell is unchanged: skip
//!    - Otherwise: render cell with StatefulCellRenderer
//! 3. Flush output buffer (single write)
//! 4. Store current frame as previous for next comparison

use std::io::{self, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Differential renderer for fullscreen mode.
pub struct DiffRenderer<W: Write> {
    out: W,
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl<W: Write> DiffRenderer<W> {
    /// Create a renderer writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Render a frame, outputting only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let comparable = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        ansi::begin_sync(&mut self.output)?;
        self.cell_renderer.reset();

        let mut written = 0;
        for (x, y, cell) in buffer.iter() {
            let changed = match comparable {
                Some(prev) => prev.get(x, y) != Some(cell),
                None => true,
            };
            if changed {
                written += 1;
                self.cell_renderer.render_cell(&mut self.output, x, y, cell)?;
            }
        }

        ansi::reset(&mut self.output)?;
        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(&mut self.out)?;

        match &mut self.previous {
            Some(prev) if prev.width() == buffer.width() && prev.height() == buffer.height() => {
                prev.clone_from(buffer);
            }
            _ => self.previous = Some(buffer.clone()),
        }

        Ok(written)
    }

    /// Invalidate the previous frame.
    ///
    /// Next render will be a full redraw.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Enter fullscreen mode (alternate screen buffer).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        ansi::enter_alt_screen(&mut self.output)?;
        ansi::cursor_hide(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.output.flush_to(&mut self.out)?;
        self.invalidate();
        Ok(())
    }

    /// Exit fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.output.flush_to(&mut self.out)
    }

    /// The underlying writer.
    pub fn writer(&self) -> &W {
        &self.out
    }
}

// =============================================================================
// Tests
// =============================================================================
