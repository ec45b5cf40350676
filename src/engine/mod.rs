//! Step engine - instrumented, interruptible sorting.
//!
//! The engine owns nothing between runs. A run borrows:
//! - DataBuffer: the values being sorted
//! - StatsCollector: comparison/access counters and timing
//! - Render: receives a [`Frame`] after every step
//! - ControlSource: polled after every step for stop/quit
//!
//! # Architecture
//!
//! ```text
//! StepEngine::run → algorithm → Stepper primitive → checkpoint
//!                                                   ├─ Render::render(frame)
//!                                                   └─ ControlSource::poll_control()
//! ```
//!
//! Execution is single-threaded and cooperative. The engine halts at the
//! first checkpoint that observes a stop or quit request.

mod algorithms;
mod buffer;
mod control;
mod stats;
mod step;

pub use algorithms::{AlgorithmId, InsertionCounting, RunOutcome, StepEngine};
pub use buffer::DataBuffer;
pub use control::{ControlSignal, ControlSource, Frame, Render, StepEvent};
pub use stats::StatsCollector;
pub use step::{AbortReason, Halt, Step, Stepper};
