//! Run configuration.
//!
//! Parsed from the command line by the binary; library users and tests build
//! it with [`Config::default`] and struct update syntax.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::{AlgorithmId, InsertionCounting};
use crate::error::{Error, Result};

/// Default number of elements (bars).
pub const DEFAULT_SIZE: usize = 100;

/// Default upper bound for generated values.
pub const DEFAULT_MAX_VALUE: i32 = 600;

#[derive(Debug, Clone, Parser)]
#[command(name = "sortscope")]
#[command(about = "Watch sorting algorithms run step by step in the terminal")]
pub struct Config {
    /// Number of elements to sort.
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Largest generated value; values span [1, max-value].
    #[arg(long, default_value_t = DEFAULT_MAX_VALUE)]
    pub max_value: i32,

    /// Seed for the shuffle. Uses OS entropy when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Per-step animation delay in milliseconds, overriding the per-algorithm default.
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// How insertion sort counts the comparisons of its shift loop.
    #[arg(long, value_enum, default_value_t = InsertionCounting::FirstOnly)]
    pub insertion_counting: InsertionCounting,

    /// Log file path.
    #[arg(long, default_value = "sortscope.log")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            max_value: DEFAULT_MAX_VALUE,
            seed: None,
            delay_ms: None,
            insertion_counting: InsertionCounting::FirstOnly,
            log_file: PathBuf::from("sortscope.log"),
        }
    }
}

impl Config {
    /// Reject values the data buffer cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidConfig("size must be at least 1".into()));
        }
        if self.max_value <= 0 {
            return Err(Error::InvalidConfig(format!(
                "max-value must be positive, got {}",
                self.max_value
            )));
        }
        Ok(())
    }

    /// Animation delay after each step of `algorithm`.
    pub fn step_delay(&self, algorithm: AlgorithmId) -> Duration {
        match self.delay_ms {
            Some(ms) => Duration::from_millis(ms),
            None => algorithm.default_step_delay(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
