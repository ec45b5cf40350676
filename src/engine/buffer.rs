//! DataBuffer - the sequence being sorted.
//!
//! Generation follows a ramp-then-shuffle rule: index `i` first receives a
//! value on the linear ramp from 1 to `max_value`, then a Fisher-Yates pass
//! from the last index down to 1 draws one position per slot. A sorted
//! buffer therefore always renders as a straight diagonal.
//!
//! The length is fixed once generated. Only the step engine mutates the
//! contents, through the crate-private primitives at the bottom of this file.

use rand::Rng;

use crate::error::{Error, Result};

/// Owned, fixed-length buffer of values in `[1, max_value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataBuffer {
    values: Vec<i32>,
    max_value: i32,
}

impl DataBuffer {
    /// Generate a shuffled ramp of `size` values using OS entropy.
    pub fn create(size: usize, max_value: i32) -> Result<Self> {
        Self::create_with_rng(size, max_value, &mut rand::thread_rng())
    }

    /// Generate a shuffled ramp of `size` values drawing from `rng`.
    pub fn create_with_rng<R: Rng + ?Sized>(size: usize, max_value: i32, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("buffer size must be at least 1".into()));
        }
        if max_value <= 0 {
            return Err(Error::InvalidConfig(format!(
                "buffer max value must be positive, got {max_value}"
            )));
        }

        let mut values = allocate(size)?;
        fill_ramp(&mut values, size, max_value);
        shuffle(&mut values, rng);

        Ok(Self { values, max_value })
    }

    /// Build a buffer from explicit values.
    ///
    /// `max_value` is taken from the data (at least 1).
    pub fn from_values(values: Vec<i32>) -> Self {
        let max_value = values.iter().copied().max().unwrap_or(1).max(1);
        Self { values, max_value }
    }

    /// Replace the contents with a freshly generated permutation.
    ///
    /// On failure the previous contents are left untouched.
    pub fn reset<R: Rng + ?Sized>(&mut self, size: usize, max_value: i32, rng: &mut R) -> Result<()> {
        *self = Self::create_with_rng(size, max_value, rng)?;
        Ok(())
    }

    /// Read-only view of the values.
    #[inline]
    pub fn values(&self) -> &[i32] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Upper bound used for generation (and bar scaling).
    #[inline]
    pub fn max_value(&self) -> i32 {
        self.max_value
    }

    /// True if the values are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    // =========================================================================
    // Engine primitives (uncounted; the stepper does the bookkeeping)
    // =========================================================================

    #[inline]
    pub(crate) fn get(&self, index: usize) -> i32 {
        self.values[index]
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, value: i32) {
        self.values[index] = value;
    }

    #[inline]
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.values.swap(a, b);
    }
}

// =============================================================================
// Generation
// =============================================================================

fn allocate(size: usize) -> Result<Vec<i32>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(size)
        .map_err(|_| Error::Allocation { requested: size })?;
    Ok(values)
}

/// Linear ramp from 1 to `max_value` across `size` slots.
fn fill_ramp(values: &mut Vec<i32>, size: usize, max_value: i32) {
    if size == 1 {
        values.push(1);
        return;
    }
    let span = (max_value - 1) as f64;
    let last = (size - 1) as f64;
    for i in 0..size {
        values.push(((i as f64 / last) * span) as i32 + 1);
    }
}

/// Fisher-Yates, last index down to 1, one draw per position.
fn shuffle<R: Rng + ?Sized>(values: &mut [i32], rng: &mut R) {
    for i in (1..values.len()).rev() {
        let j = rng.gen_range(0..=i);
        values.swap(i, j);
    }
}

// =============================================================================
// TESTS
// =============================================================================
