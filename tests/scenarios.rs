//! End-to-end scenarios through the public API.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;

use sortscope::{
    AbortReason, AlgorithmId, Command, CommandOutcome, Config, ControlSignal, ControlSource,
    DataBuffer, Frame, InsertionCounting, Render, RunOutcome, SessionController, SessionState,
    StatsCollector, StepEngine, StepEvent,
};

// =============================================================================
// Helpers
// =============================================================================

/// Records every step event, and every clean frame as `None`.
#[derive(Default)]
struct Recorder {
    events: Vec<Option<StepEvent>>,
}

impl Render for Recorder {
    fn render(&mut self, frame: &Frame<'_>) {
        self.events.push(frame.step_event());
    }
}

impl Recorder {
    fn steps(&self) -> Vec<StepEvent> {
        self.events.iter().flatten().copied().collect()
    }
}

/// Replays a fixed list of signals, then continues forever.
struct Script(VecDeque<ControlSignal>);

impl Script {
    fn new(signals: impl IntoIterator<Item = ControlSignal>) -> Self {
        Self(signals.into_iter().collect())
    }
}

impl ControlSource for Script {
    fn poll_control(&mut self) -> ControlSignal {
        self.0.pop_front().unwrap_or(ControlSignal::Continue)
    }
}

fn run(algorithm: AlgorithmId, values: Vec<i32>) -> (DataBuffer, StatsCollector, Recorder, RunOutcome) {
    let engine = StepEngine::new(InsertionCounting::FirstOnly);
    let mut buffer = DataBuffer::from_values(values);
    let mut stats = StatsCollector::new();
    let mut recorder = Recorder::default();
    let outcome = engine.run(
        algorithm,
        &mut buffer,
        &mut stats,
        &mut recorder,
        &mut ControlSignal::Continue,
    );
    (buffer, stats, recorder, outcome)
}

fn sorted(mut values: Vec<i32>) -> Vec<i32> {
    values.sort_unstable();
    values
}

// =============================================================================
// Engine
// =============================================================================

#[test]
fn test_every_algorithm_sorts_random_buffers() {
    let mut rng = StdRng::seed_from_u64(42);
    for algorithm in AlgorithmId::ALL {
        for size in [0usize, 1, 2, 3, 17, 64, 200] {
            let input = if size == 0 {
                Vec::new()
            } else {
                DataBuffer::create_with_rng(size, 500, &mut rng).unwrap().values().to_vec()
            };

            let (buffer, _, recorder, outcome) = run(algorithm, input.clone());

            assert_eq!(outcome, RunOutcome::Completed, "{algorithm} size {size}");
            assert!(buffer.is_sorted(), "{algorithm} size {size}");
            assert_eq!(buffer.values(), sorted(input).as_slice());
            assert_eq!(recorder.events.last(), Some(&None), "clean frame last");
        }
    }
}

#[test]
fn test_stop_before_first_step_leaves_buffer_unchanged() {
    let engine = StepEngine::default();
    for algorithm in AlgorithmId::ALL {
        let input = vec![9, 4, 7, 1, 8, 2];
        let mut buffer = DataBuffer::from_values(input.clone());
        let mut stats = StatsCollector::new();

        let outcome = engine.run(
            algorithm,
            &mut buffer,
            &mut stats,
            &mut (),
            &mut ControlSignal::StopRequested,
        );

        assert_eq!(outcome, RunOutcome::Aborted(AbortReason::Stop), "{algorithm}");
        assert_eq!(buffer.values(), input.as_slice(), "{algorithm}");
    }
}

#[test]
fn test_abort_midway_keeps_permutation() {
    let engine = StepEngine::default();
    let input: Vec<i32> = (1..=30).rev().collect();

    for algorithm in AlgorithmId::ALL {
        let mut buffer = DataBuffer::from_values(input.clone());
        let mut stats = StatsCollector::new();
        let mut recorder = Recorder::default();
        let mut control = Script::new(
            std::iter::repeat_n(ControlSignal::Continue, 10).chain([ControlSignal::QuitRequested]),
        );

        let outcome = engine.run(algorithm, &mut buffer, &mut stats, &mut recorder, &mut control);

        assert_eq!(outcome, RunOutcome::Aborted(AbortReason::Quit), "{algorithm}");
        assert_eq!(recorder.events.len(), 11, "{algorithm} halts at the quit poll");
        assert!(recorder.events.iter().all(Option::is_some), "no clean frame on abort");
        assert_eq!(sorted(buffer.values().to_vec()), sorted(input.clone()));
    }
}

#[test]
fn test_bubble_two_elements() {
    let (buffer, stats, recorder, outcome) = run(AlgorithmId::Bubble, vec![2, 1]);

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(buffer.values(), &[1, 2]);
    assert_eq!(stats.comparisons(), 1);
    assert_eq!(recorder.steps().len(), 2);
}

#[test]
fn test_bubble_sorted_input_single_pass() {
    let (_, stats, recorder, outcome) = run(AlgorithmId::Bubble, (1..=8).collect());

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(stats.comparisons(), 7);
    // One compare event per pair, no swaps
    assert_eq!(recorder.steps().len(), 7);
    assert_eq!(stats.memory_accesses(), 14);
}

#[test]
fn test_selection_scenario() {
    let (buffer, stats, recorder, outcome) = run(AlgorithmId::Selection, vec![5, 3, 4, 1, 2]);

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(buffer.values(), &[1, 2, 3, 4, 5]);
    assert!(stats.comparisons() >= 4);

    let mut outer: Vec<usize> = recorder.steps().iter().filter_map(|e| e.a).collect();
    outer.dedup();
    assert_eq!(outer, vec![0, 1, 2, 3]);
}

#[test]
fn test_quick_scenario() {
    let (buffer, _, recorder, outcome) = run(AlgorithmId::Quick, vec![3, 1, 2]);

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(buffer.values(), &[1, 2, 3]);
    let pivot_placed = recorder.steps()[2];
    assert_eq!(pivot_placed, StepEvent { a: Some(1), b: Some(2) });
}

#[test]
fn test_insertion_counting_modes() {
    let input: Vec<i32> = vec![5, 4, 3, 2, 1];
    let mut counts = Vec::new();

    for mode in [InsertionCounting::FirstOnly, InsertionCounting::EveryTest] {
        let engine = StepEngine::new(mode);
        let mut buffer = DataBuffer::from_values(input.clone());
        let mut stats = StatsCollector::new();
        let outcome = engine.run(
            AlgorithmId::Insertion,
            &mut buffer,
            &mut stats,
            &mut (),
            &mut ControlSignal::Continue,
        );
        assert!(outcome.is_completed());
        counts.push(stats.comparisons());
    }

    // One per outer iteration versus one per shift-loop test
    assert_eq!(counts[0], 4);
    assert_eq!(counts[1], 10);
}

// =============================================================================
// Stats
// =============================================================================

#[test]
fn test_stats_reset_is_idempotent() {
    let mut stats = StatsCollector::new();
    stats.record_comparison();
    stats.record_accesses(3);
    stats.start_timing().unwrap();

    stats.reset();
    let once = (stats.comparisons(), stats.memory_accesses(), stats.is_running());
    stats.reset();
    let twice = (stats.comparisons(), stats.memory_accesses(), stats.is_running());

    assert_eq!(once, (0, 0, false));
    assert_eq!(once, twice);
    assert_eq!(stats.live_elapsed_secs(), 0.0);
}

#[test]
fn test_live_elapsed_never_decreases() {
    let mut stats = StatsCollector::new();
    stats.start_timing().unwrap();
    let mut last = stats.live_elapsed_secs();
    for _ in 0..200 {
        let now = stats.live_elapsed_secs();
        assert!(now >= last);
        last = now;
    }
}

// =============================================================================
// Session
// =============================================================================

fn session() -> SessionController {
    SessionController::new(Config {
        size: 32,
        max_value: 100,
        seed: Some(5),
        ..Config::default()
    })
    .unwrap()
}

#[test]
fn test_session_full_cycle() {
    let mut session = session();
    let mut continue_ = ControlSignal::Continue;

    let outcome = session.dispatch(Command::Start, &mut (), &mut continue_).unwrap();
    assert_eq!(outcome, CommandOutcome::NoAlgorithmSelected);
    assert_eq!(session.state(), SessionState::Idle);

    session.dispatch(Command::Select(AlgorithmId::Quick), &mut (), &mut continue_).unwrap();
    let outcome = session.dispatch(Command::Start, &mut (), &mut continue_).unwrap();
    assert_eq!(outcome, CommandOutcome::Ran(RunOutcome::Completed));
    assert_eq!(session.state(), SessionState::Completed);
    assert!(session.buffer().is_sorted());
    assert!(!session.stats().is_running());

    let outcome = session.dispatch(Command::Reset, &mut (), &mut continue_).unwrap();
    assert_eq!(outcome, CommandOutcome::Reset);
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.selected(), None);
    assert_eq!(session.buffer().len(), 32);
    assert_eq!(session.stats().comparisons(), 0);

    let outcome = session.dispatch(Command::Quit, &mut (), &mut continue_).unwrap();
    assert!(outcome.wants_exit());
    assert!(session.is_terminated());
}

#[test]
fn test_session_stop_then_restart() {
    let mut session = session();
    session
        .dispatch(Command::Select(AlgorithmId::Bubble), &mut (), &mut ControlSignal::Continue)
        .unwrap();

    let mut stop = Script::new([ControlSignal::Continue, ControlSignal::StopRequested]);
    let outcome = session.dispatch(Command::Start, &mut (), &mut stop).unwrap();
    assert_eq!(outcome, CommandOutcome::Ran(RunOutcome::Aborted(AbortReason::Stop)));
    assert_eq!(outcome.message(), "Stopped");
    assert_eq!(session.state(), SessionState::Aborted);
    assert!(!outcome.wants_exit());

    let outcome = session
        .dispatch(Command::Start, &mut (), &mut ControlSignal::Continue)
        .unwrap();
    assert_eq!(outcome, CommandOutcome::Ran(RunOutcome::Completed));
    assert!(session.buffer().is_sorted());
}
