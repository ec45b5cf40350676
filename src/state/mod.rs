//! State Module - Runtime input handling
//!
//! - **Keyboard** - Event types and the legend key map
//! - **Input** - crossterm conversion, command polling, the terminal control source

pub mod input;
pub mod keyboard;

pub use input::{convert_key_event, signal_for, CrosstermEvents, EventSource, InputEvent, ScriptedEvents, TerminalInput};
pub use keyboard::{command_for, legend, KeyState, KeyboardEvent, Modifiers};
