//! Collaborator seams of the step engine.
//!
//! The engine never touches the terminal. After each logical step it hands a
//! [`Frame`] to a [`Render`] implementation, then asks a [`ControlSource`]
//! whether to keep going.
//!
//! A run with no display and no input is simply:
//!
//! ```ignore
//! engine.run(AlgorithmId::Quick, &mut buffer, &mut stats, &mut (), &mut ControlSignal::Continue);
//! ```

use super::algorithms::AlgorithmId;
use super::buffer::DataBuffer;
use super::stats::StatsCollector;

// =============================================================================
// CONTROL SIGNAL
// =============================================================================

/// Request from the outer loop, read by the engine at every checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlSignal {
    #[default]
    Continue,
    StopRequested,
    QuitRequested,
}

impl ControlSignal {
    #[inline]
    pub fn is_continue(self) -> bool {
        self == Self::Continue
    }

    /// Combine two signals polled in the same batch, keeping the stronger one.
    ///
    /// Quit beats stop, stop beats continue.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::QuitRequested, _) | (_, Self::QuitRequested) => Self::QuitRequested,
            (Self::StopRequested, _) | (_, Self::StopRequested) => Self::StopRequested,
            _ => Self::Continue,
        }
    }
}

/// Non-blocking source of control signals (the input collaborator).
pub trait ControlSource {
    /// Return the request accumulated since the last poll.
    fn poll_control(&mut self) -> ControlSignal;
}

/// A constant signal.
impl ControlSource for ControlSignal {
    fn poll_control(&mut self) -> ControlSignal {
        *self
    }
}

impl<F> ControlSource for F
where
    F: FnMut() -> ControlSignal,
{
    fn poll_control(&mut self) -> ControlSignal {
        self()
    }
}

// =============================================================================
// FRAMES
// =============================================================================

/// Indices touched by the most recent primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepEvent {
    pub a: Option<usize>,
    pub b: Option<usize>,
}

/// Read-only snapshot handed to the render collaborator.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub buffer: &'a DataBuffer,
    pub highlight_a: Option<usize>,
    pub highlight_b: Option<usize>,
    pub selected: Option<AlgorithmId>,
    pub stats: &'a StatsCollector,
}

impl<'a> Frame<'a> {
    /// A frame with nothing highlighted.
    pub fn clean(
        buffer: &'a DataBuffer,
        selected: Option<AlgorithmId>,
        stats: &'a StatsCollector,
    ) -> Self {
        Self {
            buffer,
            highlight_a: None,
            highlight_b: None,
            selected,
            stats,
        }
    }

    /// True if no index is highlighted.
    pub fn is_clean(&self) -> bool {
        self.highlight_a.is_none() && self.highlight_b.is_none()
    }

    /// The step event carried by this frame, if any index is highlighted.
    pub fn step_event(&self) -> Option<StepEvent> {
        if self.is_clean() {
            None
        } else {
            Some(StepEvent {
                a: self.highlight_a,
                b: self.highlight_b,
            })
        }
    }
}

/// Consumer of frames (the render collaborator). Must not block for long.
pub trait Render {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Discards every frame.
impl Render for () {
    fn render(&mut self, _frame: &Frame<'_>) {}
}

// =============================================================================
// TESTS
// =============================================================================
