//! StatsCollector - comparison/access counters and run timing.
//!
//! Time is kept as an accumulated total plus an optional start instant for
//! the run in progress, so the display can show a live figure without
//! touching the counters:
//!
//! ```text
//! live = accumulated + (now - run_start)   while running
//! live = accumulated                       otherwise
//! ```

use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Performance counters for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsCollector {
    comparisons: u64,
    memory_accesses: u64,
    accumulated: Duration,
    run_start: Option<Instant>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero all counters and clear the running timestamp.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn record_comparison(&mut self) {
        self.comparisons += 1;
    }

    #[inline]
    pub fn record_accesses(&mut self, n: u64) {
        self.memory_accesses += n;
    }

    /// Begin timing a run.
    ///
    /// Fails if a run is already being timed; stop or reset first.
    pub fn start_timing(&mut self) -> Result<()> {
        if self.run_start.is_some() {
            return Err(Error::TimerAlreadyRunning);
        }
        self.run_start = Some(Instant::now());
        Ok(())
    }

    /// Fold the running interval into the accumulated time.
    ///
    /// No-op when not running.
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.run_start.take() {
            self.accumulated += start.elapsed();
        }
    }

    /// Elapsed execution time including the run in progress.
    pub fn live_elapsed(&self) -> Duration {
        match self.run_start {
            Some(start) => self.accumulated + start.elapsed(),
            None => self.accumulated,
        }
    }

    /// [`live_elapsed`](Self::live_elapsed) in seconds.
    pub fn live_elapsed_secs(&self) -> f64 {
        self.live_elapsed().as_secs_f64()
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.run_start.is_some()
    }

    #[inline]
    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    #[inline]
    pub fn memory_accesses(&self) -> u64 {
        self.memory_accesses
    }

    /// Time folded in by completed `stop_timing` calls.
    #[inline]
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }
}

// =============================================================================
// TESTS
// =============================================================================
