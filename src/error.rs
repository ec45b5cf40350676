//! Error types for sortscope.
//!
//! Only conditions that can escape a component are errors. A stopped run is
//! a [`RunOutcome`](crate::engine::RunOutcome), and a command that does not
//! apply in the current state is a
//! [`CommandOutcome`](crate::session::CommandOutcome).

use thiserror::Error;

/// Errors surfaced by the engine, the session and the terminal layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The data buffer could not reserve storage. Fatal to the session.
    #[error("failed to allocate a buffer of {requested} elements")]
    Allocation { requested: usize },

    /// Rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// `start_timing` was called while a run was already being timed.
    #[error("timer is already running")]
    TimerAlreadyRunning,

    /// A command reached a session that has quit or failed.
    #[error("session has terminated")]
    SessionTerminated,

    /// The layout engine rejected the screen tree.
    #[error("layout failed: {0}")]
    Layout(String),

    /// Terminal I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
