//! The four sorting algorithms and the engine entry point.
//!
//! Each algorithm is a plain function over a [`Stepper`]. Checkpoints return
//! `Err(Halt)` on stop/quit, so an abort unwinds with `?` through loops and
//! Quick sort's recursion alike. Only [`StepEngine::run`] turns the halt into
//! a [`RunOutcome`] and emits the clean frame on completion.

use std::cmp::Ordering;
use std::time::Duration;

use clap::ValueEnum;

use super::buffer::DataBuffer;
use super::control::{ControlSource, Render};
use super::stats::StatsCollector;
use super::step::{AbortReason, Halt, Step, Stepper};

// =============================================================================
// ALGORITHM ID
// =============================================================================

/// Selectable sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    Bubble,
    Selection,
    Insertion,
    Quick,
}

impl AlgorithmId {
    /// In legend order.
    pub const ALL: [AlgorithmId; 4] = [Self::Bubble, Self::Selection, Self::Insertion, Self::Quick];

    pub fn name(self) -> &'static str {
        match self {
            Self::Bubble => "Bubble Sort",
            Self::Selection => "Selection Sort",
            Self::Insertion => "Insertion Sort",
            Self::Quick => "Quick Sort",
        }
    }

    /// Legend key that selects this algorithm.
    pub fn key(self) -> char {
        match self {
            Self::Bubble => '1',
            Self::Selection => '2',
            Self::Insertion => '3',
            Self::Quick => '4',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Animation pause after each step event.
    pub fn default_step_delay(self) -> Duration {
        match self {
            Self::Bubble => Duration::from_millis(1),
            Self::Selection => Duration::from_millis(20),
            Self::Insertion | Self::Quick => Duration::from_millis(5),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How insertion sort charges the tests of its shift loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum InsertionCounting {
    /// Only the first test of each outer iteration is counted.
    #[default]
    FirstOnly,
    /// Every test against the key is counted.
    EveryTest,
}

// =============================================================================
// ENGINE
// =============================================================================

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Aborted(AbortReason),
}

impl RunOutcome {
    #[inline]
    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }

    /// True if the run was halted by a quit request.
    #[inline]
    pub fn is_quit(self) -> bool {
        self == Self::Aborted(AbortReason::Quit)
    }
}

/// Runs algorithms one observable step at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepEngine {
    insertion_counting: InsertionCounting,
}

impl StepEngine {
    pub fn new(insertion_counting: InsertionCounting) -> Self {
        Self { insertion_counting }
    }

    pub fn insertion_counting(&self) -> InsertionCounting {
        self.insertion_counting
    }

    /// Sort `buffer` in place with `algorithm`.
    ///
    /// Every primitive is charged to `stats`. After each step `render` sees
    /// the frame and `control` is polled; a stop or quit request returns
    /// `Aborted` with the buffer left as it is. A finished run emits one last
    /// frame with nothing highlighted. Timing is the caller's business.
    pub fn run(
        &self,
        algorithm: AlgorithmId,
        buffer: &mut DataBuffer,
        stats: &mut StatsCollector,
        render: &mut dyn Render,
        control: &mut dyn ControlSource,
    ) -> RunOutcome {
        let mut s = Stepper::new(algorithm, buffer, stats, render, control);

        let result = match algorithm {
            AlgorithmId::Bubble => bubble(&mut s),
            AlgorithmId::Selection => selection(&mut s),
            AlgorithmId::Insertion => insertion(&mut s, self.insertion_counting),
            AlgorithmId::Quick => quick(&mut s),
        };

        match result {
            Ok(()) => {
                s.clean_frame();
                RunOutcome::Completed
            }
            Err(Halt(reason)) => RunOutcome::Aborted(reason),
        }
    }
}

// =============================================================================
// ALGORITHMS
// =============================================================================

/// Adjacent-pair passes, stopping after a pass with no swap.
fn bubble(s: &mut Stepper<'_>) -> Step {
    let n = s.len();
    for i in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - i {
            let order = s.compare(j, j + 1);
            s.checkpoint(Some(j), Some(j + 1))?;
            if order == Ordering::Greater {
                s.swap(j, j + 1);
                swapped = true;
                s.checkpoint(Some(j), Some(j + 1))?;
            }
        }
        if !swapped {
            break;
        }
    }
    Ok(())
}

/// Scan for the minimum silently, then show and place it.
fn selection(s: &mut Stepper<'_>) -> Step {
    let n = s.len();
    for i in 0..n.saturating_sub(1) {
        let mut min = i;
        for j in i + 1..n {
            if s.compare(j, min) == Ordering::Less {
                min = j;
            }
        }
        s.checkpoint(Some(i), Some(min))?;
        if min != i {
            s.swap(i, min);
            s.checkpoint(Some(i), Some(min))?;
        }
    }
    Ok(())
}

/// Shift-based insertion.
///
/// The key is written back into the hole even when the shift loop halts, so
/// an aborted run still leaves a permutation of the input. That write-back
/// happens after the halt and is still charged one access: a run stopped at
/// its first checkpoint reports 2 accesses (key read plus write-back).
fn insertion(s: &mut Stepper<'_>, counting: InsertionCounting) -> Step {
    for i in 1..s.len() {
        let key = s.read(i);
        let mut hole = i;
        let shifted = shift_greater(s, i, key, counting, &mut hole);
        s.write(hole, key);
        shifted?;
    }
    Ok(())
}

/// Move every element left of `i` that exceeds `key` one slot right.
/// `hole` tracks the free slot.
fn shift_greater(
    s: &mut Stepper<'_>,
    i: usize,
    key: i32,
    counting: InsertionCounting,
    hole: &mut usize,
) -> Step {
    s.checkpoint(Some(i - 1), Some(i))?;

    let mut first = true;
    while *hole > 0 {
        let left = *hole - 1;
        let greater = if first || counting == InsertionCounting::EveryTest {
            s.compare_value(left, key) == Ordering::Greater
        } else {
            s.peek(left) > key
        };
        first = false;
        if !greater {
            break;
        }

        let value = s.read(left);
        s.write(*hole, value);
        *hole = left;
        s.checkpoint(left.checked_sub(1), Some(i))?;
    }
    Ok(())
}

fn quick(s: &mut Stepper<'_>) -> Step {
    let n = s.len();
    if n < 2 {
        return Ok(());
    }
    quick_range(s, 0, n - 1)
}

fn quick_range(s: &mut Stepper<'_>, low: usize, high: usize) -> Step {
    if low >= high {
        return Ok(());
    }
    let p = partition(s, low, high)?;
    if p > low {
        quick_range(s, low, p - 1)?;
    }
    quick_range(s, p + 1, high)
}

/// Lomuto partition around `buffer[high]`. Returns the pivot's final index.
fn partition(s: &mut Stepper<'_>, low: usize, high: usize) -> Step<usize> {
    let mut store = low;
    for j in low..high {
        if s.compare(j, high) == Ordering::Less {
            s.swap(store, j);
            store += 1;
        }
        s.checkpoint(Some(j), Some(high))?;
    }
    s.swap(store, high);
    s.checkpoint(Some(store), Some(high))?;
    Ok(store)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::control::{ControlSignal, Frame};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct Recorder {
        events: Vec<(Option<usize>, Option<usize>)>,
    }

    impl Render for Recorder {
        fn render(&mut self, frame: &Frame<'_>) {
            self.events.push((frame.highlight_a, frame.highlight_b));
        }
    }

    fn run(algorithm: AlgorithmId, values: Vec<i32>) -> (DataBuffer, StatsCollector, Recorder, RunOutcome) {
        let mut buffer = DataBuffer::from_values(values);
        let mut stats = StatsCollector::new();
        let mut recorder = Recorder::default();
        let outcome = StepEngine::default().run(
            algorithm,
            &mut buffer,
            &mut stats,
            &mut recorder,
            &mut ControlSignal::Continue,
        );
        (buffer, stats, recorder, outcome)
    }

    fn sorted_copy(buffer: &DataBuffer) -> Vec<i32> {
        let mut v = buffer.values().to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_every_algorithm_sorts_every_size() {
        let mut rng = StdRng::seed_from_u64(42);
        for algorithm in AlgorithmId::ALL {
            for size in 1..=40 {
                let input = DataBuffer::create_with_rng(size, 97, &mut rng).unwrap();
                let expected = sorted_copy(&input);
                let (buffer, _, recorder, outcome) = run(algorithm, input.values().to_vec());

                assert_eq!(outcome, RunOutcome::Completed, "{algorithm} size {size}");
                assert_eq!(buffer.values(), expected.as_slice(), "{algorithm} size {size}");
                assert_eq!(recorder.events.last(), Some(&(None, None)));
            }
        }
    }

    #[test]
    fn test_empty_buffer_completes() {
        for algorithm in AlgorithmId::ALL {
            let (buffer, stats, recorder, outcome) = run(algorithm, Vec::new());
            assert!(outcome.is_completed());
            assert!(buffer.is_empty());
            assert_eq!(stats.comparisons(), 0);
            assert_eq!(recorder.events, vec![(None, None)]);
        }
    }

    #[test]
    fn test_duplicates_sort() {
        for algorithm in AlgorithmId::ALL {
            let (buffer, _, _, _) = run(algorithm, vec![3, 1, 3, 2, 1, 3]);
            assert_eq!(buffer.values(), &[1, 1, 2, 3, 3, 3]);
        }
    }

    #[test]
    fn test_bubble_two_elements() {
        let (buffer, stats, recorder, outcome) = run(AlgorithmId::Bubble, vec![2, 1]);
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(buffer.values(), &[1, 2]);
        assert_eq!(stats.comparisons(), 1);
        assert_eq!(stats.memory_accesses(), 2 + 4);
        assert_eq!(recorder.events, vec![(Some(0), Some(1)), (Some(0), Some(1)), (None, None)]);
    }

    #[test]
    fn test_bubble_sorted_input_exits_after_one_pass() {
        let (_, stats, _, _) = run(AlgorithmId::Bubble, (1..=10).collect());
        assert_eq!(stats.comparisons(), 9);
    }

    #[test]
    fn test_selection_outer_iterations() {
        let (buffer, stats, recorder, _) = run(AlgorithmId::Selection, vec![5, 3, 4, 1, 2]);
        assert_eq!(buffer.values(), &[1, 2, 3, 4, 5]);
        assert_eq!(stats.comparisons(), 4 + 3 + 2 + 1);

        let visits: Vec<_> = recorder.events.iter().filter_map(|e| e.0).collect();
        let mut outer: Vec<_> = visits.clone();
        outer.dedup();
        assert_eq!(outer, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_insertion_first_only_counting() {
        // [3, 2, 1]: i=1 shifts once, i=2 shifts twice.
        let (buffer, stats, recorder, _) = run(AlgorithmId::Insertion, vec![3, 2, 1]);
        assert_eq!(buffer.values(), &[1, 2, 3]);
        assert_eq!(stats.comparisons(), 2);
        assert_eq!(
            recorder.events,
            vec![
                (Some(0), Some(1)),
                (None, Some(1)),
                (Some(1), Some(2)),
                (Some(0), Some(2)),
                (None, Some(2)),
                (None, None),
            ]
        );
    }

    #[test]
    fn test_insertion_every_test_counting() {
        let mut buffer = DataBuffer::from_values(vec![3, 2, 1]);
        let mut stats = StatsCollector::new();
        let engine = StepEngine::new(InsertionCounting::EveryTest);
        engine.run(AlgorithmId::Insertion, &mut buffer, &mut stats, &mut (), &mut ControlSignal::Continue);

        assert_eq!(buffer.values(), &[1, 2, 3]);
        // i=1: one greater test, loop ends at index 0. i=2: two greater tests.
        assert_eq!(stats.comparisons(), 3);
    }

    #[test]
    fn test_quick_three_elements() {
        let (buffer, _, recorder, outcome) = run(AlgorithmId::Quick, vec![3, 1, 2]);
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(buffer.values(), &[1, 2, 3]);
        // Pivot placement at index 1 of the first partition.
        assert_eq!(recorder.events[2], (Some(1), Some(2)));
    }

    #[test]
    fn test_stop_before_first_step_leaves_buffer() {
        for algorithm in AlgorithmId::ALL {
            let input = vec![4, 1, 3, 2];
            let mut buffer = DataBuffer::from_values(input.clone());
            let mut stats = StatsCollector::new();
            let mut recorder = Recorder::default();
            let outcome = StepEngine::default().run(
                algorithm,
                &mut buffer,
                &mut stats,
                &mut recorder,
                &mut ControlSignal::StopRequested,
            );

            assert_eq!(outcome, RunOutcome::Aborted(AbortReason::Stop), "{algorithm}");
            assert_eq!(buffer.values(), input.as_slice(), "{algorithm}");
            assert_eq!(recorder.events.len(), 1, "{algorithm}");
            assert!(recorder.events.iter().all(|e| *e != (None, None)));
        }
    }

    #[test]
    fn test_insertion_stop_still_charges_write_back() {
        let mut buffer = DataBuffer::from_values(vec![3, 1, 2]);
        let mut stats = StatsCollector::new();
        let outcome = StepEngine::default().run(
            AlgorithmId::Insertion,
            &mut buffer,
            &mut stats,
            &mut (),
            &mut ControlSignal::StopRequested,
        );

        assert_eq!(outcome, RunOutcome::Aborted(AbortReason::Stop));
        assert_eq!(buffer.values(), &[3, 1, 2]);
        assert_eq!(stats.comparisons(), 0);
        assert_eq!(stats.memory_accesses(), 2);
    }

    #[test]
    fn test_abort_at_any_step_keeps_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let input = DataBuffer::create_with_rng(24, 50, &mut rng).unwrap();
        let expected = sorted_copy(&input);

        for algorithm in AlgorithmId::ALL {
            for stop_after in 1..80 {
                let mut buffer = input.clone();
                let mut stats = StatsCollector::new();
                let mut polls = 0;
                let mut control = || {
                    polls += 1;
                    if polls >= stop_after { ControlSignal::QuitRequested } else { ControlSignal::Continue }
                };
                let outcome =
                    StepEngine::default().run(algorithm, &mut buffer, &mut stats, &mut (), &mut control);

                if !outcome.is_completed() {
                    assert!(outcome.is_quit(), "{algorithm} stop_after {stop_after}");
                }
                assert_eq!(sorted_copy(&buffer), expected, "{algorithm} stop_after {stop_after}");
            }
        }
    }

    #[test]
    fn test_abort_halts_at_next_checkpoint() {
        let mut buffer = DataBuffer::from_values((1..=50).rev().collect());
        let mut stats = StatsCollector::new();
        let mut recorder = Recorder::default();
        let mut polls = 0;
        let mut control = || {
            polls += 1;
            if polls == 3 { ControlSignal::StopRequested } else { ControlSignal::Continue }
        };
        let outcome =
            StepEngine::default().run(AlgorithmId::Bubble, &mut buffer, &mut stats, &mut recorder, &mut control);

        assert_eq!(outcome, RunOutcome::Aborted(AbortReason::Stop));
        assert_eq!(recorder.events.len(), 3);
        assert_eq!(polls, 3);
    }

    #[test]
    fn test_key_mapping() {
        for id in AlgorithmId::ALL {
            assert_eq!(AlgorithmId::from_key(id.key()), Some(id));
        }
        assert_eq!(AlgorithmId::from_key('5'), None);
    }
}
