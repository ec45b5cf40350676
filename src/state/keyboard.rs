//! Keyboard Module - Key event values and the legend key map
//!
//! Does NOT own stdin (that is the input module). This module only describes
//! key events and decides which [`Command`] a key stands for.
//!
//! # Key map
//!
//! | Key                 | Command            |
//! |---------------------|--------------------|
//! | `1` `2` `3` `4`     | Select algorithm   |
//! | `s`                 | Start              |
//! | `e`                 | Stop               |
//! | `r`                 | Reset              |
//! | `q`, Escape, Ctrl+C | Quit               |
//!
//! Letters are case-insensitive. Only presses count.

use crate::engine::AlgorithmId;
use crate::session::Command;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "Escape")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }

    /// The key as a single lowercase character, if it is one.
    fn char_key(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c.to_ascii_lowercase()),
            _ => None,
        }
    }
}

// =============================================================================
// KEY MAP
// =============================================================================

/// The command bound to `event`, if any.
pub fn command_for(event: &KeyboardEvent) -> Option<Command> {
    if !event.is_press() {
        return None;
    }
    if event.key == "Escape" {
        return Some(Command::Quit);
    }

    let c = event.char_key()?;
    if event.modifiers.ctrl {
        return (c == 'c').then_some(Command::Quit);
    }

    match c {
        's' => Some(Command::Start),
        'e' => Some(Command::Stop),
        'r' => Some(Command::Reset),
        'q' => Some(Command::Quit),
        _ => AlgorithmId::from_key(c).map(Command::Select),
    }
}

/// Legend lines, in display order.
pub fn legend() -> Vec<String> {
    let mut lines: Vec<String> = AlgorithmId::ALL
        .iter()
        .map(|id| format!("{}: {}", id.key(), id.name()))
        .collect();
    lines.push(String::new());
    lines.push("S: Start".into());
    lines.push("E: Stop".into());
    lines.push("R: Reset".into());
    lines.push("Q: Quit".into());
    lines
}

// =============================================================================
// TESTS
// =============================================================================
