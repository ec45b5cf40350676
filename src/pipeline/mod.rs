//! Screen pipeline
//!
//! Connects the session to the terminal.
//!
//! # Pipeline Architecture
//!
//! ```text
//! terminal size signals → regions derived → paint_frame → DiffRenderer
//! ```
//!
//! ## Data Flow
//!
//! 1. **terminal** - width/height signals, set on resize events
//! 2. **layout** - Taffy computes the stats, bars and legend regions
//! 3. **frame** - paints an engine frame into a FrameBuffer
//! 4. **mount** - terminal lifecycle, TerminalView and the application loop

pub mod frame;
pub mod layout;
pub mod mount;
pub mod terminal;

// Re-exports
pub use frame::{paint_frame, stats_lines};
pub use layout::{compute_regions, create_regions_derived, Regions};
pub use mount::{mount, run, run_loop, MountHandle, RegionsResult, TerminalView};
pub use terminal::{detect_terminal_size, set_terminal_size, terminal_height, terminal_width};
