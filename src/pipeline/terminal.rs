//! Terminal state signals.
//!
//! Reactive signals for the terminal dimensions. They are the root signals
//! of the screen layout: a resize event sets them, and the layout derived
//! recomputes the regions on its next read.

use spark_signals::{signal, Signal};
use std::cell::RefCell;

// =============================================================================
// Terminal Size Signals
// =============================================================================

thread_local! {
    static TERMINAL_WIDTH: RefCell<Signal<u16>> = RefCell::new(signal(80));
    static TERMINAL_HEIGHT: RefCell<Signal<u16>> = RefCell::new(signal(24));
}

/// Get the current terminal width.
pub fn terminal_width() -> u16 {
    TERMINAL_WIDTH.with(|w| w.borrow().get())
}

/// Get the current terminal height.
pub fn terminal_height() -> u16 {
    TERMINAL_HEIGHT.with(|h| h.borrow().get())
}

/// Set the terminal size (called on resize events).
pub fn set_terminal_size(width: u16, height: u16) {
    TERMINAL_WIDTH.with(|w| w.borrow().set(width));
    TERMINAL_HEIGHT.with(|h| h.borrow().set(height));
}

/// Get the terminal width signal for reactive tracking.
pub fn terminal_width_signal() -> Signal<u16> {
    TERMINAL_WIDTH.with(|w| w.borrow().clone())
}

/// Get the terminal height signal for reactive tracking.
pub fn terminal_height_signal() -> Signal<u16> {
    TERMINAL_HEIGHT.with(|h| h.borrow().clone())
}

// =============================================================================
// Terminal Detection
// =============================================================================

/// Detect and set the actual terminal size.
///
/// Keeps the previous size if crossterm cannot query the terminal.
pub fn detect_terminal_size() {
    if let Ok((width, height)) = crossterm::terminal::size() {
        set_terminal_size(width, height);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_size() {
        set_terminal_size(120, 40);
        assert_eq!(terminal_width(), 120);
        assert_eq!(terminal_height(), 40);
    }

    #[test]
    fn test_signal_handles_share_state() {
        let width = terminal_width_signal();
        let height = terminal_height_signal();
        set_terminal_size(100, 30);
        assert_eq!(width.get(), 100);
        assert_eq!(height.get(), 30);
    }
}
