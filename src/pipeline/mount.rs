//! Mount API - terminal lifecycle and the application loop.
//!
//! [`mount`] puts the terminal in raw mode on the alternate screen and
//! returns a [`MountHandle`]; dropping the handle restores the terminal.
//! [`run`] then drives the session from keyboard input until a quit.
//!
//! ```ignore
//! let mut handle = mount()?;
//! let mut input = TerminalInput::new();
//! run(&mut handle, &mut session, &mut input)?;
//! drop(handle);
//! ```
//!
//! While idle the loop redraws every [`IDLE_FRAME`] so the screen follows
//! resizes. During a run the engine drives drawing through the
//! [`TerminalView`]'s [`Render`] impl, and the input doubles as the
//! engine's control source.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use spark_signals::Derived;
use tracing::{debug, warn};

use super::frame::paint_frame;
use super::layout::{Regions, create_regions_derived};
use super::terminal::{detect_terminal_size, terminal_height, terminal_width};
use crate::engine::{Frame, Render};
use crate::error::{Error, Result};
use crate::renderer::{DiffRenderer, FrameBuffer};
use crate::session::{Command, CommandOutcome, SessionController};
use crate::state::{EventSource, TerminalInput};

/// Poll timeout between idle redraws (about 60 fps).
pub const IDLE_FRAME: Duration = Duration::from_millis(16);

/// What the regions derived yields.
pub type RegionsResult = std::result::Result<Regions, String>;

// =============================================================================
// Terminal View
// =============================================================================

/// Paints frames into a FrameBuffer and diff-renders them to `W`.
pub struct TerminalView<W: Write, F: Fn() -> RegionsResult + 'static> {
    renderer: DiffRenderer<W>,
    regions: Derived<RegionsResult, F>,
    buffer: FrameBuffer,
    status: String,
    step_delay: Duration,
    error: Option<Error>,
}

impl<W: Write, F: Fn() -> RegionsResult + 'static> TerminalView<W, F> {
    pub fn new(out: W, regions: Derived<RegionsResult, F>) -> Self {
        Self {
            renderer: DiffRenderer::new(out),
            regions,
            buffer: FrameBuffer::new(0, 0),
            status: String::new(),
            step_delay: Duration::ZERO,
            error: None,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Pause after each highlighted frame.
    pub fn set_step_delay(&mut self, delay: Duration) {
        self.step_delay = delay;
    }

    /// The last painted frame.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn renderer_mut(&mut self) -> &mut DiffRenderer<W> {
        &mut self.renderer
    }

    /// Paint `frame` at the current terminal size and write the changes.
    pub fn draw(&mut self, frame: &Frame<'_>) -> Result<()> {
        let (width, height) = (terminal_width(), terminal_height());
        if self.buffer.width() != width || self.buffer.height() != height {
            self.buffer.resize(width, height);
        }

        let regions = self.regions.get().map_err(Error::Layout)?;
        paint_frame(&mut self.buffer, &regions, frame, &self.status);
        self.renderer.render(&self.buffer)?;
        Ok(())
    }

    /// The first error hit while rendering engine frames. Cleared by the call.
    pub fn take_error(&mut self) -> Option<Error> {
        self.error.take()
    }
}

impl<W: Write, F: Fn() -> RegionsResult + 'static> Render for TerminalView<W, F> {
    fn render(&mut self, frame: &Frame<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.draw(frame) {
            warn!(%err, "render failed");
            self.error = Some(err);
            return;
        }
        if !frame.is_clean() && !self.step_delay.is_zero() {
            thread::sleep(self.step_delay);
        }
    }
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Owns the fullscreen view. Dropping it restores the terminal.
pub struct MountHandle<F: Fn() -> RegionsResult + 'static> {
    view: TerminalView<Stdout, F>,
    mounted: bool,
}

impl<F: Fn() -> RegionsResult + 'static> MountHandle<F> {
    pub fn view_mut(&mut self) -> &mut TerminalView<Stdout, F> {
        &mut self.view
    }

    /// Leave the alternate screen and raw mode, reporting failures.
    pub fn unmount(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.mounted {
            return Ok(());
        }
        self.mounted = false;
        let screen = self.view.renderer_mut().exit_fullscreen();
        let raw = disable_raw_mode();
        screen.and(raw)
    }
}

impl<F: Fn() -> RegionsResult + 'static> Drop for MountHandle<F> {
    fn drop(&mut self) {
        // Best effort; unmount() reports errors
        let _ = self.restore();
    }
}

/// Enter raw mode and the alternate screen on stdout.
pub fn mount() -> io::Result<MountHandle<impl Fn() -> RegionsResult + 'static>> {
    detect_terminal_size();
    enable_raw_mode()?;

    let view = TerminalView::new(io::stdout(), create_regions_derived());
    let mut handle = MountHandle { view, mounted: true };
    handle.view.renderer_mut().enter_fullscreen()?;
    Ok(handle)
}

// =============================================================================
// Event Loop
// =============================================================================

/// Run the application on a mounted terminal until the user quits.
pub fn run<F, S>(
    handle: &mut MountHandle<F>,
    session: &mut SessionController,
    input: &mut TerminalInput<S>,
) -> Result<()>
where
    F: Fn() -> RegionsResult + 'static,
    S: EventSource,
{
    run_loop(handle.view_mut(), session, input)
}

/// The application loop over any view and event source.
pub fn run_loop<W, F, S>(
    view: &mut TerminalView<W, F>,
    session: &mut SessionController,
    input: &mut TerminalInput<S>,
) -> Result<()>
where
    W: Write,
    F: Fn() -> RegionsResult + 'static,
    S: EventSource,
{
    while !session.is_terminated() {
        let frame = Frame::clean(session.buffer(), session.selected(), session.stats());
        view.draw(&frame)?;

        let Some(command) = input.next_command(IDLE_FRAME)? else {
            continue;
        };
        debug!(?command, "command");

        if let (Command::Start, Some(id)) = (command, session.selected()) {
            view.set_step_delay(session.config().step_delay(id));
        }

        let outcome = session.dispatch(command, view, input)?;

        if let Some(err) = input.take_error() {
            return Err(err.into());
        }
        if let Some(err) = view.take_error() {
            return Err(err);
        }
        if outcome != CommandOutcome::Ignored {
            view.set_status(outcome.message());
        }
        if outcome.wants_exit() && !session.is_terminated() {
            session.dispatch(Command::Quit, view, input)?;
        }
    }

    let frame = Frame::clean(session.buffer(), session.selected(), session.stats());
    view.draw(&frame)
}

// =============================================================================
// Tests
// =============================================================================
