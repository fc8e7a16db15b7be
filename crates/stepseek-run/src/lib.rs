//! **stepseek-run**: control layer for step-wise searches.
//!
//! - [`StepController`]: Idle / Running / Paused / Completed / Failed
//!   state machine that advances a [`SearchEngine`](stepseek_paths::SearchEngine)
//!   one step per request
//! - [`ReplanningSupervisor`]: owns the grid, spawns dynamic obstacles on
//!   external ticks and restarts the search when an obstacle invalidates it
//! - [`Control`]: the requests a user interface sends to the supervisor
//! - [`SessionConfig`]: grid size, endpoints, variant and spawn rate
//!
//! Nothing here keeps time: the caller decides when to call
//! [`ReplanningSupervisor::run`] and [`ReplanningSupervisor::tick`].

pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod stats;
pub mod supervisor;

pub use config::{ConfigError, SessionConfig};
pub use control::Control;
pub use controller::{RunState, StepController};
pub use error::{ControlError, SessionError};
pub use stats::RunStats;
pub use supervisor::ReplanningSupervisor;
