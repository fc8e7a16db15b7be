//! [`StepController`]: the run/pause state machine around a
//! [`SearchEngine`].

use std::fmt;

use stepseek_core::Grid;
use stepseek_paths::{SearchConfig, SearchEngine, StepEvent, Variant};

use crate::error::ControlError;

/// Lifecycle of a search driven by a [`StepController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunState {
    /// No search exists.
    #[default]
    Idle,
    /// The caller is stepping the search with [`StepController::run`].
    Running,
    Paused,
    /// A path was found.
    Completed,
    /// The search ended without a path.
    Failed,
}

impl RunState {
    /// Completed or failed.
    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Failed => "failed",
        })
    }
}

/// Drives one [`SearchEngine`] a single step at a time.
///
/// The controller never times anything: [`run`](Self::run) performs one step
/// per call and the caller decides the cadence. The grid is passed in on
/// every call, so it can be mutated freely between calls.
#[derive(Clone, Debug)]
pub struct StepController {
    state: RunState,
    variant: Variant,
    config: SearchConfig,
    engine: Option<SearchEngine>,
    steps: usize,
    last: Option<StepEvent>,
}

impl StepController {
    pub fn new(variant: Variant, config: SearchConfig) -> Self {
        Self {
            state: RunState::Idle,
            variant,
            config,
            engine: None,
            steps: 0,
            last: None,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Idle -> Running. Builds a fresh search on `grid`.
    pub fn start(&mut self, grid: &Grid) -> Result<(), ControlError> {
        if self.state != RunState::Idle {
            return Err(self.reject("start"));
        }
        self.ensure_engine(grid);
        self.enter(RunState::Running);
        Ok(())
    }

    /// Running -> Paused.
    pub fn pause(&mut self) -> Result<(), ControlError> {
        if self.state != RunState::Running {
            return Err(self.reject("pause"));
        }
        self.enter(RunState::Paused);
        Ok(())
    }

    /// Paused -> Running.
    pub fn resume(&mut self) -> Result<(), ControlError> {
        if self.state != RunState::Paused {
            return Err(self.reject("resume"));
        }
        self.enter(RunState::Running);
        Ok(())
    }

    /// The start/pause button: start when idle, otherwise flip between
    /// running and paused. A finished search must be reset first.
    pub fn toggle(&mut self, grid: &Grid) -> Result<(), ControlError> {
        match self.state {
            RunState::Idle => self.start(grid),
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Completed | RunState::Failed => Err(self.reject("toggle")),
        }
    }

    /// Perform exactly one step from Idle or Paused.
    ///
    /// From Idle the search is created first. Afterwards the controller is
    /// Paused, or Completed/Failed if the step ended the search.
    pub fn step_forward(&mut self, grid: &Grid) -> Result<StepEvent, ControlError> {
        let from = self.state;
        if !matches!(from, RunState::Idle | RunState::Paused) {
            return Err(self.reject("step forward"));
        }
        self.state = RunState::Running;
        let ev = self.advance(grid);
        if self.state == RunState::Running {
            self.state = RunState::Paused;
        }
        if self.state != from {
            log::debug!("controller: {from} -> {}", self.state);
        }
        Ok(ev)
    }

    /// Perform one step while Running.
    pub fn run(&mut self, grid: &Grid) -> Result<StepEvent, ControlError> {
        if self.state != RunState::Running {
            return Err(self.reject("run"));
        }
        let ev = self.advance(grid);
        if self.state != RunState::Running {
            log::debug!("controller: running -> {}", self.state);
        }
        Ok(ev)
    }

    /// Step while Running until the search ends, returning the terminal
    /// event.
    pub fn finish(&mut self, grid: &Grid) -> Result<StepEvent, ControlError> {
        loop {
            let ev = self.run(grid)?;
            if ev.is_terminal() {
                return Ok(ev);
            }
        }
    }

    /// Drop the search and return to Idle. Valid from every state.
    pub fn reset(&mut self) {
        self.engine = None;
        self.steps = 0;
        self.last = None;
        if self.state != RunState::Idle {
            self.enter(RunState::Idle);
        }
    }

    /// Change the variant for the next search. Only allowed while no search
    /// exists.
    pub fn set_variant(&mut self, variant: Variant) -> Result<(), ControlError> {
        if self.state != RunState::Idle || self.engine.is_some() {
            log::warn!("controller: variant change to {variant} ignored while {}", self.state);
            return Err(ControlError::SearchActive);
        }
        self.variant = variant;
        Ok(())
    }

    /// Replace the current search with a fresh one on `grid`, keeping the
    /// variant. A completed search resumes running; running and paused
    /// searches keep their state. Idle and failed controllers are left
    /// alone and `false` is returned.
    pub fn restart(&mut self, grid: &Grid) -> bool {
        match self.state {
            RunState::Idle | RunState::Failed => return false,
            RunState::Completed => self.enter(RunState::Running),
            RunState::Running | RunState::Paused => {}
        }
        self.engine = Some(SearchEngine::for_grid(self.variant, grid, &self.config));
        self.last = None;
        true
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The current search, if one exists.
    pub fn engine(&self) -> Option<&SearchEngine> {
        self.engine.as_ref()
    }

    /// Steps taken since the last reset, across restarts.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The event produced by the most recent step of the current search.
    pub fn last_event(&self) -> Option<&StepEvent> {
        self.last.as_ref()
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn ensure_engine(&mut self, grid: &Grid) -> &mut SearchEngine {
        self.engine
            .get_or_insert_with(|| SearchEngine::for_grid(self.variant, grid, &self.config))
    }

    /// One engine step; moves to Completed or Failed on a terminal event.
    fn advance(&mut self, grid: &Grid) -> StepEvent {
        let ev = self.ensure_engine(grid).step(grid);
        self.steps += 1;
        match ev {
            StepEvent::PathFound { .. } => self.state = RunState::Completed,
            StepEvent::Failure(_) => self.state = RunState::Failed,
            _ => {}
        }
        self.last = Some(ev.clone());
        ev
    }

    fn enter(&mut self, to: RunState) {
        log::debug!("controller: {} -> {to}", self.state);
        self.state = to;
    }

    fn reject(&self, request: &'static str) -> ControlError {
        log::warn!("controller: {request} ignored while {}", self.state);
        ControlError::InvalidTransition {
            from: self.state,
            request,
        }
    }
}

impl Default for StepController {
    fn default() -> Self {
        Self::new(Variant::default(), SearchConfig::default())
    }
}
