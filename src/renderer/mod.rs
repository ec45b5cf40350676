//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about cells. It doesn't understand sorting,
//! layout, or sessions. It takes a filled FrameBuffer and writes optimized
//! ANSI escape sequences to the terminal.
//!
//! Fullscreen only ([`DiffRenderer`]): alternate screen buffer, differential
//! rendering (only outputs changed cells).

pub mod ansi;
pub mod buffer;
pub mod diff;
pub mod output;

pub use buffer::{char_width, string_width, FrameBuffer};
pub use crate::types::ClipRect;
pub use diff::DiffRenderer;
pub use output::{OutputBuffer, StatefulCellRenderer};
