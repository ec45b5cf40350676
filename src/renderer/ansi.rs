//! ANSI escape sequences for terminal control.
//!
//! This module provides the escape sequences the renderer needs:
//! - Cursor movement and visibility
//! - Screen clearing and the alternate screen
//! - Colors (TrueColor and terminal default)
//! - Text attributes
//! - Synchronized output for flicker-free rendering

use crate::types::{Attr, Rgba};
use std::io::Write;

// =============================================================================
// Cursor
// =============================================================================

/// Move cursor to absolute position (0-indexed in, 1-indexed out).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Hide cursor.
#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

/// Show cursor.
#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen Control
// =============================================================================

/// Clear screen and scrollback buffer.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2J\x1b[3J\x1b[H")
}

/// Enter alternate screen buffer (fullscreen mode).
#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049h")
}

/// Exit alternate screen buffer.
#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049l")
}

// =============================================================================
// Synchronized Output (Flicker Prevention)
// =============================================================================

/// Begin synchronized output (terminal buffers until end_sync).
#[inline]
pub fn begin_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026h")
}

/// End synchronized output (terminal flushes buffer).
#[inline]
pub fn end_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026l")
}

// =============================================================================
// Colors
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Set foreground color.
#[inline]
pub fn fg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[39m")
    } else {
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Set background color.
#[inline]
pub fn bg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[49m")
    } else {
        write!(w, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }
}

// =============================================================================
// Text Attributes
// =============================================================================

/// Set text attributes from bitflags.
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> std::io::Result<()> {
    const CODES: [(Attr, u8); 5] = [
        (Attr::BOLD, 1),
        (Attr::DIM, 2),
        (Attr::ITALIC, 3),
        (Attr::UNDERLINE, 4),
        (Attr::INVERSE, 7),
    ];

    let mut first = true;
    for (flag, code) in CODES {
        if !attr.contains(flag) {
            continue;
        }
        let sep = if first { "\x1b[" } else { ";" };
        write!(w, "{sep}{code}")?;
        first = false;
    }

    if first { Ok(()) } else { write!(w, "m") }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string<F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_cursor_to() {
        assert_eq!(to_string(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(to_string(|w| cursor_to(w, 5, 10)), "\x1b[11;6H");
    }

    #[test]
    fn test_cursor_visibility() {
        assert_eq!(to_string(cursor_hide), "\x1b[?25l");
        assert_eq!(to_string(cursor_show), "\x1b[?25h");
    }

    #[test]
    fn test_screen_control() {
        assert_eq!(to_string(enter_alt_screen), "\x1b[?1049h");
        assert_eq!(to_string(exit_alt_screen), "\x1b[?1049l");
        assert_eq!(to_string(clear_screen), "\x1b[2J\x1b[3J\x1b[H");
    }

    #[test]
    fn test_sync_output() {
        assert_eq!(to_string(begin_sync), "\x1b[?2026h");
        assert_eq!(to_string(end_sync), "\x1b[?2026l");
    }

    #[test]
    fn test_colors() {
        assert_eq!(to_string(|w| fg(w, Rgba::TERMINAL_DEFAULT)), "\x1b[39m");
        assert_eq!(to_string(|w| bg(w, Rgba::TERMINAL_DEFAULT)), "\x1b[49m");
        assert_eq!(to_string(|w| fg(w, Rgba::rgb(255, 128, 64))), "\x1b[38;2;255;128;64m");
        assert_eq!(to_string(|w| bg(w, Rgba::rgb(0, 128, 255))), "\x1b[48;2;0;128;255m");
    }

    #[test]
    fn test_attrs() {
        assert_eq!(to_string(|w| attrs(w, Attr::NONE)), "");
        assert_eq!(to_string(|w| attrs(w, Attr::BOLD)), "\x1b[1m");
        assert_eq!(to_string(|w| attrs(w, Attr::BOLD | Attr::UNDERLINE)), "\x1b[1;4m");
        assert_eq!(to_string(|w| attrs(w, Attr::DIM | Attr::INVERSE)), "\x1b[2;7m");
    }

    #[test]
    fn test_reset() {
        assert_eq!(to_string(reset), "\x1b[0m");
    }
}
