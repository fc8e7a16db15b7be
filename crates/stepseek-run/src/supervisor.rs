//! [`ReplanningSupervisor`]: owns the grid and the controller, and restarts
//! the search when a new obstacle lands on work it depends on.

use rand::{Rng, RngExt};
use stepseek_core::{Coord, DrawMode, Grid, Spawned};
use stepseek_paths::{SearchEngine, StepEvent, Variant};

use crate::config::{ConfigError, SessionConfig};
use crate::control::Control;
use crate::controller::{RunState, StepController};
use crate::error::SessionError;
use crate::stats::RunStats;

/// A search session: grid, controller, random source and event outbox.
///
/// Every event the search produces, plus [`StepEvent::ReplanTriggered`],
/// is appended to an outbox that the animator empties with
/// [`drain_events`](Self::drain_events).
pub struct ReplanningSupervisor<R: Rng> {
    grid: Grid,
    controller: StepController,
    rng: R,
    spawn_probability: f64,
    events: Vec<StepEvent>,
    replans: usize,
}

impl<R: Rng> ReplanningSupervisor<R> {
    /// Create an idle session on an empty grid.
    pub fn new(config: &SessionConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grid: config.build_grid()?,
            controller: StepController::new(config.variant, config.search),
            rng,
            spawn_probability: config.spawn_probability,
            events: Vec::new(),
            replans: 0,
        })
    }

    /// Apply a control request.
    pub fn update(&mut self, msg: Control) -> Result<(), SessionError> {
        match msg {
            Control::ToggleRun => self.toggle_run(),
            Control::StepForward => self.step_forward().map(|_| ()),
            Control::Run => self.run().map(|_| ()),
            Control::Reset => {
                self.reset();
                Ok(())
            }
            Control::ClearWalls => {
                self.clear_walls();
                Ok(())
            }
            Control::Draw { cell, mode } => self.toggle_wall(cell, mode).map(|_| ()),
            Control::PlaceObstacle(cell) => self.place_obstacle(cell).map(|_| ()),
            Control::SetStart(cell) => self.set_start(cell),
            Control::SetGoal(cell) => self.set_goal(cell),
            Control::SelectVariant(v) => self.select_variant(v),
            Control::Tick => {
                self.tick();
                Ok(())
            }
        }
    }

    // -----------------------------------------------------------------------
    // Search control
    // -----------------------------------------------------------------------

    pub fn toggle_run(&mut self) -> Result<(), SessionError> {
        Ok(self.controller.toggle(&self.grid)?)
    }

    /// One step while idle or paused.
    pub fn step_forward(&mut self) -> Result<StepEvent, SessionError> {
        let ev = self.controller.step_forward(&self.grid)?;
        self.events.push(ev.clone());
        Ok(ev)
    }

    /// One step while running.
    pub fn run(&mut self) -> Result<StepEvent, SessionError> {
        let ev = self.controller.run(&self.grid)?;
        self.events.push(ev.clone());
        Ok(ev)
    }

    /// Alternate [`run`](Self::run) and [`tick`](Self::tick) until the
    /// search stops running. Starts the search first if idle.
    pub fn run_until_done(&mut self) -> Result<StepEvent, SessionError> {
        if self.controller.state() == RunState::Idle {
            self.toggle_run()?;
        }
        loop {
            let ev = self.run()?;
            self.tick();
            if self.controller.state() != RunState::Running {
                return Ok(ev);
            }
        }
    }

    /// Drop the search and the dynamic obstacles. Walls stay.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.replans = 0;
        let n = self.grid.clear_obstacles();
        log::debug!("reset: removed {n} obstacles");
    }

    /// Drop the search, walls and obstacles.
    pub fn clear_walls(&mut self) {
        self.controller.reset();
        self.replans = 0;
        let n = self.grid.clear_walls();
        log::debug!("clear walls: cleared {n} cells");
    }

    /// Change the variant used by the next search. Fails while a search
    /// exists.
    pub fn select_variant(&mut self, variant: Variant) -> Result<(), SessionError> {
        Ok(self.controller.set_variant(variant)?)
    }

    // -----------------------------------------------------------------------
    // Grid mutation
    // -----------------------------------------------------------------------

    /// Draw or erase a wall. Returns whether the cell changed.
    pub fn toggle_wall(&mut self, cell: Coord, mode: DrawMode) -> Result<bool, SessionError> {
        Ok(self.grid.toggle_wall(cell, mode)?)
    }

    /// Move the start cell. Any search is discarded.
    pub fn set_start(&mut self, cell: Coord) -> Result<(), SessionError> {
        self.grid.set_start(cell)?;
        self.controller.reset();
        Ok(())
    }

    /// Move the goal cell. Any search is discarded.
    pub fn set_goal(&mut self, cell: Coord) -> Result<(), SessionError> {
        self.grid.set_goal(cell)?;
        self.controller.reset();
        Ok(())
    }

    /// External clock tick: spawn an obstacle with the configured
    /// probability.
    pub fn tick(&mut self) -> Option<Spawned> {
        if !self.rng.random_bool(self.spawn_probability) {
            return None;
        }
        self.spawn_dynamic_obstacle()
    }

    /// Spawn an obstacle on a random empty cell and replan if it hits the
    /// search. Returns `None` when the grid has no empty cell left.
    pub fn spawn_dynamic_obstacle(&mut self) -> Option<Spawned> {
        let path = self
            .controller
            .engine()
            .and_then(SearchEngine::path)
            .unwrap_or(&[]);
        let spawned = self.grid.spawn_dynamic_obstacle(&mut self.rng, path)?;
        log::trace!(
            "spawned obstacle at {} (on path: {})",
            spawned.cell,
            spawned.on_path
        );
        self.notify_obstacle(spawned.cell);
        Some(spawned)
    }

    /// Put an obstacle on `cell` if it is empty, replanning if needed.
    /// Returns whether the obstacle was placed.
    pub fn place_obstacle(&mut self, cell: Coord) -> Result<bool, SessionError> {
        let placed = self.grid.place_obstacle(cell)?;
        if placed {
            self.notify_obstacle(cell);
        }
        Ok(placed)
    }

    /// React to a new obstacle on `cell`. Returns whether a replan happened.
    ///
    /// A completed search replans when its path crosses `cell`; a running or
    /// paused one when it has already reached `cell`. Idle and failed
    /// searches keep going without action.
    pub fn notify_obstacle(&mut self, cell: Coord) -> bool {
        let Some(engine) = self.controller.engine() else {
            return false;
        };
        let hit = match self.controller.state() {
            RunState::Completed => engine.path().is_some_and(|p| p.contains(&cell)),
            RunState::Running | RunState::Paused => engine.is_reached(cell),
            RunState::Idle | RunState::Failed => false,
        };
        if !hit {
            return false;
        }
        if self.controller.restart(&self.grid) {
            self.replans += 1;
            self.events.push(StepEvent::ReplanTriggered);
            log::info!(
                "{}: obstacle at {cell} invalidates the search, replan #{}",
                self.controller.variant(),
                self.replans
            );
        }
        true
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.controller.state()
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.controller.variant()
    }

    pub fn engine(&self) -> Option<&SearchEngine> {
        self.controller.engine()
    }

    #[inline]
    pub fn replans(&self) -> usize {
        self.replans
    }

    /// Events not yet drained.
    pub fn events(&self) -> &[StepEvent] {
        &self.events
    }

    /// Take every pending event, oldest first.
    pub fn drain_events(&mut self) -> Vec<StepEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn stats(&self) -> RunStats {
        RunStats::collect(
            self.controller.engine(),
            self.controller.steps(),
            self.replans,
        )
    }
}
