//! # sortscope
//!
//! Step-by-step sorting algorithm visualizer for the terminal.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for the
//! reactive screen layout.
//!
//! ## Architecture
//!
//! The engine runs one algorithm at a time over a [`DataBuffer`]. Every
//! counted primitive goes through a checkpoint that hands a [`Frame`] to a
//! [`Render`] collaborator and polls a [`ControlSource`] for stop or quit:
//!
//! ```text
//! keys → TerminalInput → SessionController → StepEngine → Frame → TerminalView
//!                ▲                                          │
//!                └────────────── poll_control ◄─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Data buffer, statistics, the four algorithms
//! - [`session`] - Command state machine around the engine
//! - [`state`] - Keyboard mapping and terminal input
//! - [`pipeline`] - Layout, frame painting, mount and the application loop
//! - [`renderer`] - FrameBuffer, ANSI output, diff rendering
//! - [`config`] - Command line configuration
//! - [`types`] - Colors, cells, attributes, rectangles

pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod renderer;
pub mod session;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::Config;
pub use error::{Error, Result};

pub use engine::{
    AbortReason, AlgorithmId, ControlSignal, ControlSource, DataBuffer, Frame, InsertionCounting,
    Render, RunOutcome, StatsCollector, StepEngine, StepEvent,
};

pub use session::{Command, CommandOutcome, SessionController, SessionState};

pub use state::{command_for, legend, EventSource, KeyboardEvent, ScriptedEvents, TerminalInput};

pub use renderer::{DiffRenderer, FrameBuffer};

pub use pipeline::{
    compute_regions, mount, run, run_loop, set_terminal_size, MountHandle, Regions, TerminalView,
};
