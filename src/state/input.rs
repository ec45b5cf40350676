//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the session's commands and the
//! engine's control signals.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our KeyboardEvent
//! - `TerminalInput::next_command` - Wait up to a timeout for one command (between runs)
//! - `TerminalInput` as [`ControlSource`] - Drain pending input without blocking (during runs)
//!
//! # Example
//!
//! ```ignore
//! use sortscope::state::input::TerminalInput;
//! use std::time::Duration;
//!
//! let mut input = TerminalInput::new();
//! loop {
//!     if let Some(command) = input.next_command(Duration::from_millis(16))? {
//!         // dispatch
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
};
use tracing::debug;

use super::keyboard::{command_for, KeyState, KeyboardEvent, Modifiers};
use crate::engine::{ControlSignal, ControlSource};
use crate::pipeline::terminal::set_terminal_size;
use crate::session::Command;

// =============================================================================
// INPUT EVENT ENUM
// =============================================================================

/// Events the application cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(KeyboardEvent),
    /// Terminal resize event (new width, height)
    Resize(u16, u16),
    /// No event or unhandled event type
    None,
}

impl From<CrosstermEvent> for InputEvent {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            CrosstermEvent::Key(key) => Self::Key(convert_key_event(key)),
            CrosstermEvent::Resize(w, h) => Self::Resize(w, h),
            _ => Self::None,
        }
    }
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert crossterm KeyEvent to our KeyboardEvent
pub fn convert_key_event(event: CrosstermKeyEvent) -> KeyboardEvent {
    let key = match event.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Esc => "Escape".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => String::new(),
    };

    let state = match event.kind {
        KeyEventKind::Press => KeyState::Press,
        KeyEventKind::Repeat => KeyState::Repeat,
        KeyEventKind::Release => KeyState::Release,
    };

    KeyboardEvent {
        key,
        modifiers: convert_modifiers(event.modifiers),
        state,
    }
}

/// Convert crossterm KeyModifiers to our Modifiers
fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
        shift: mods.contains(KeyModifiers::SHIFT),
    }
}

/// Control signal for a command read while a run is in progress.
///
/// Selection, start and reset are not accepted mid-run.
pub fn signal_for(command: Command) -> ControlSignal {
    match command {
        Command::Stop => ControlSignal::StopRequested,
        Command::Quit => ControlSignal::QuitRequested,
        Command::Select(_) | Command::Start | Command::Reset => ControlSignal::Continue,
    }
}

// =============================================================================
// EVENT SOURCE
// =============================================================================

/// Where raw terminal events come from.
pub trait EventSource {
    /// True if an event is ready within `timeout`.
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    /// Read the next event (blocking).
    fn read(&mut self) -> io::Result<CrosstermEvent>;
}

/// The process's terminal, through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        crossterm::event::poll(timeout)
    }

    fn read(&mut self) -> io::Result<CrosstermEvent> {
        crossterm::event::read()
    }
}

/// A fixed queue of events, for driving the app without a terminal.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    events: VecDeque<CrosstermEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = CrosstermEvent>) -> Self {
        Self { events: events.into_iter().collect() }
    }

    pub fn push(&mut self, event: CrosstermEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<CrosstermEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted events left"))
    }
}

// =============================================================================
// TERMINAL INPUT
// =============================================================================

/// Reads commands between runs and control signals during them.
///
/// Resize events update the terminal size signals as they are read.
pub struct TerminalInput<S: EventSource = CrosstermEvents> {
    source: S,
    error: Option<io::Error>,
}

impl TerminalInput<CrosstermEvents> {
    pub fn new() -> Self {
        Self::with_source(CrosstermEvents)
    }
}

impl Default for TerminalInput<CrosstermEvents> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSource> TerminalInput<S> {
    pub fn with_source(source: S) -> Self {
        Self { source, error: None }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Wait up to `timeout` for one event and return its command, if any.
    pub fn next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !self.source.poll(timeout)? {
            return Ok(None);
        }
        let event = self.source.read()?.into();
        Ok(self.handle(event))
    }

    /// An I/O error hit while polling during a run. Cleared by the call.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    fn handle(&mut self, event: InputEvent) -> Option<Command> {
        match event {
            InputEvent::Key(key) => command_for(&key),
            InputEvent::Resize(w, h) => {
                set_terminal_size(w, h);
                None
            }
            InputEvent::None => None,
        }
    }

    fn drain(&mut self) -> io::Result<ControlSignal> {
        let mut signal = ControlSignal::Continue;
        while self.source.poll(Duration::ZERO)? {
            let event = self.source.read()?.into();
            if let Some(command) = self.handle(event) {
                let next = signal_for(command);
                if next.is_continue() {
                    debug!(?command, "command dropped during run");
                }
                signal = signal.merge(next);
            }
        }
        Ok(signal)
    }
}

impl<S: EventSource> ControlSource for TerminalInput<S> {
    /// Drain every pending event and return the strongest request.
    ///
    /// A read failure is kept for [`take_error`](TerminalInput::take_error)
    /// and reported as a quit request.
    fn poll_control(&mut self) -> ControlSignal {
        match self.drain() {
            Ok(signal) => signal,
            Err(err) => {
                self.error = Some(err);
                ControlSignal::QuitRequested
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
