//! SessionController - the command state machine around the step engine.
//!
//! ```text
//!            Select(id)              Start
//!   Idle ──────────────► Selected ──────────► Running ──┬─► Completed
//!    ▲                      ▲                           └─► Aborted
//!    │ Reset (from any)     └──── Select(id) from Completed / Aborted
//!
//!   Quit (from any) ──► Terminated      allocation failure ──► Failed
//! ```
//!
//! `Start` runs the engine synchronously: [`SessionController::dispatch`]
//! returns only when the run has finished or been aborted. Terminated and
//! Failed are final; every later command returns
//! [`Error::SessionTerminated`].

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::engine::{
    AbortReason, AlgorithmId, ControlSource, DataBuffer, Render, RunOutcome, StatsCollector,
    StepEngine,
};
use crate::error::{Error, Result};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AlgorithmSelected(AlgorithmId),
    Running(AlgorithmId),
    Aborted,
    Completed,
    /// After `Quit`.
    Terminated,
    /// After the buffer could not be regenerated.
    Failed,
}

impl SessionState {
    /// True for the states that accept no further commands.
    pub fn is_final(self) -> bool {
        matches!(self, Self::Terminated | Self::Failed)
    }
}

/// A discrete request from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Select(AlgorithmId),
    Start,
    Stop,
    Reset,
    Quit,
}

/// What a command did. Non-fatal rejections are reported here, not as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Selected(AlgorithmId),
    Ran(RunOutcome),
    /// `Start` with nothing selected; state unchanged.
    NoAlgorithmSelected,
    /// The command has no effect in the current state.
    Ignored,
    Reset,
    Quit,
}

impl CommandOutcome {
    /// Status line text.
    pub fn message(self) -> String {
        match self {
            Self::Selected(id) => format!("{id} selected"),
            Self::Ran(RunOutcome::Completed) => "Completed".into(),
            Self::Ran(RunOutcome::Aborted(AbortReason::Stop)) => "Stopped".into(),
            Self::Ran(RunOutcome::Aborted(AbortReason::Quit)) | Self::Quit => "Quitting".into(),
            Self::NoAlgorithmSelected => "No algorithm selected!".into(),
            Self::Ignored => String::new(),
            Self::Reset => "Data reset".into(),
        }
    }

    /// True if the application should shut down.
    pub fn wants_exit(self) -> bool {
        matches!(self, Self::Quit | Self::Ran(RunOutcome::Aborted(AbortReason::Quit)))
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the buffer and stats for the lifetime of the application.
pub struct SessionController {
    config: Config,
    rng: StdRng,
    buffer: DataBuffer,
    stats: StatsCollector,
    engine: StepEngine,
    state: SessionState,
    selected: Option<AlgorithmId>,
}

impl SessionController {
    /// Validate `config` and generate the initial buffer.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let buffer = DataBuffer::create_with_rng(config.size, config.max_value, &mut rng)
            .inspect_err(|err| error!(%err, "initial buffer generation failed"))?;

        Ok(Self {
            engine: StepEngine::new(config.insertion_counting),
            config,
            rng,
            buffer,
            stats: StatsCollector::new(),
            state: SessionState::Idle,
            selected: None,
        })
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn selected(&self) -> Option<AlgorithmId> {
        self.selected
    }

    #[inline]
    pub fn buffer(&self) -> &DataBuffer {
        &self.buffer
    }

    #[inline]
    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_final()
    }

    /// Apply one command.
    ///
    /// `render` and `control` are only used by `Start`, for the duration of
    /// the run.
    pub fn dispatch(
        &mut self,
        command: Command,
        render: &mut dyn Render,
        control: &mut dyn ControlSource,
    ) -> Result<CommandOutcome> {
        if self.state.is_final() {
            return Err(Error::SessionTerminated);
        }

        match command {
            Command::Select(id) => Ok(self.select(id)),
            Command::Start => self.start(render, control),
            Command::Stop => Ok(CommandOutcome::Ignored),
            Command::Reset => self.reset(),
            Command::Quit => Ok(self.quit()),
        }
    }

    // =========================================================================
    // Commands
    // =========================================================================

    fn select(&mut self, id: AlgorithmId) -> CommandOutcome {
        self.selected = Some(id);
        self.state = SessionState::AlgorithmSelected(id);
        info!(algorithm = %id, "algorithm selected");
        CommandOutcome::Selected(id)
    }

    fn start(
        &mut self,
        render: &mut dyn Render,
        control: &mut dyn ControlSource,
    ) -> Result<CommandOutcome> {
        let Some(id) = self.selected else {
            warn!("start requested with no algorithm selected");
            return Ok(CommandOutcome::NoAlgorithmSelected);
        };

        self.stats.reset();
        self.stats.start_timing()?;
        self.state = SessionState::Running(id);
        info!(algorithm = %id, size = self.buffer.len(), "run started");

        let outcome = self
            .engine
            .run(id, &mut self.buffer, &mut self.stats, render, control);

        self.stats.stop_timing();
        self.state = match outcome {
            RunOutcome::Completed => SessionState::Completed,
            RunOutcome::Aborted(_) => SessionState::Aborted,
        };

        match outcome {
            RunOutcome::Completed => info!(algorithm = %id, "run completed"),
            RunOutcome::Aborted(reason) => info!(algorithm = %id, ?reason, "run aborted"),
        }
        debug!(
            comparisons = self.stats.comparisons(),
            memory_accesses = self.stats.memory_accesses(),
            elapsed_secs = self.stats.live_elapsed_secs(),
            "run stats"
        );

        Ok(CommandOutcome::Ran(outcome))
    }

    fn reset(&mut self) -> Result<CommandOutcome> {
        if let Err(err) = self
            .buffer
            .reset(self.config.size, self.config.max_value, &mut self.rng)
        {
            error!(%err, "buffer reset failed");
            self.stats.stop_timing();
            self.state = SessionState::Failed;
            return Err(err);
        }

        self.stats.reset();
        self.selected = None;
        self.state = SessionState::Idle;
        info!(size = self.buffer.len(), "data reset");
        Ok(CommandOutcome::Reset)
    }

    fn quit(&mut self) -> CommandOutcome {
        self.stats.stop_timing();
        self.state = SessionState::Terminated;
        info!("quit");
        CommandOutcome::Quit
    }
}

// =============================================================================
// TESTS
// =============================================================================
