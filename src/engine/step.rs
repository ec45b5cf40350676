//! Checkpointed primitives shared by every algorithm.
//!
//! Algorithms never index the buffer directly. They go through a [`Stepper`],
//! which charges each primitive to the stats collector with one fixed rule:
//!
//! | Primitive       | Comparisons | Accesses |
//! |-----------------|-------------|----------|
//! | `compare`       | 1           | 2        |
//! | `compare_value` | 1           | 1        |
//! | `swap`          | 0           | 4        |
//! | `read` / `write`| 0           | 1        |
//! | `peek`          | 0           | 0        |
//!
//! [`Stepper::checkpoint`] emits a step event and polls the control source.
//! It returns `Err(Halt)` on a stop or quit request so algorithms can bail
//! out with `?` from any depth of recursion.

use std::cmp::Ordering;

use super::algorithms::AlgorithmId;
use super::buffer::DataBuffer;
use super::control::{ControlSignal, ControlSource, Frame, Render};
use super::stats::StatsCollector;

/// Why a run stopped before finishing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// Explicit stop request; the application keeps running.
    Stop,
    /// Quit request; the caller should shut down.
    Quit,
}

/// Unwinds an algorithm back to [`run`](super::StepEngine::run).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halt(pub AbortReason);

/// Result of a checkpointed section.
pub type Step<T = ()> = std::result::Result<T, Halt>;

/// Exclusive access to one run's buffer, stats and collaborators.
pub struct Stepper<'a> {
    buffer: &'a mut DataBuffer,
    stats: &'a mut StatsCollector,
    render: &'a mut dyn Render,
    control: &'a mut dyn ControlSource,
    algorithm: AlgorithmId,
}

impl<'a> Stepper<'a> {
    pub fn new(
        algorithm: AlgorithmId,
        buffer: &'a mut DataBuffer,
        stats: &'a mut StatsCollector,
        render: &'a mut dyn Render,
        control: &'a mut dyn ControlSource,
    ) -> Self {
        Self {
            buffer,
            stats,
            render,
            control,
            algorithm,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    /// Order of `buffer[i]` relative to `buffer[j]`.
    #[inline]
    pub fn compare(&mut self, i: usize, j: usize) -> Ordering {
        self.stats.record_comparison();
        self.stats.record_accesses(2);
        self.buffer.get(i).cmp(&self.buffer.get(j))
    }

    /// Order of `buffer[i]` relative to a value already held by the algorithm.
    #[inline]
    pub fn compare_value(&mut self, i: usize, value: i32) -> Ordering {
        self.stats.record_comparison();
        self.stats.record_accesses(1);
        self.buffer.get(i).cmp(&value)
    }

    #[inline]
    pub fn swap(&mut self, i: usize, j: usize) {
        self.stats.record_accesses(4);
        self.buffer.swap(i, j);
    }

    #[inline]
    pub fn read(&mut self, i: usize) -> i32 {
        self.stats.record_accesses(1);
        self.buffer.get(i)
    }

    #[inline]
    pub fn write(&mut self, i: usize, value: i32) {
        self.stats.record_accesses(1);
        self.buffer.set(i, value);
    }

    /// Uncounted read, for tests the counting rule deliberately leaves out.
    #[inline]
    pub fn peek(&self, i: usize) -> i32 {
        self.buffer.get(i)
    }

    // =========================================================================
    // Checkpoints
    // =========================================================================

    /// Emit a step event for `(a, b)`, then poll for stop/quit.
    pub fn checkpoint(&mut self, a: Option<usize>, b: Option<usize>) -> Step {
        self.emit(a, b);
        match self.control.poll_control() {
            ControlSignal::Continue => Ok(()),
            ControlSignal::StopRequested => Err(Halt(AbortReason::Stop)),
            ControlSignal::QuitRequested => Err(Halt(AbortReason::Quit)),
        }
    }

    /// Emit the final frame with nothing highlighted.
    pub fn clean_frame(&mut self) {
        self.emit(None, None);
    }

    fn emit(&mut self, a: Option<usize>, b: Option<usize>) {
        let frame = Frame {
            buffer: &*self.buffer,
            highlight_a: a,
            highlight_b: b,
            selected: Some(self.algorithm),
            stats: &*self.stats,
        };
        self.render.render(&frame);
    }
}

// =============================================================================
// TESTS
// =============================================================================
