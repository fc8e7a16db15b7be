//! Session configuration.

use std::fmt;

use stepseek_core::{Coord, Grid, GridError};
use stepseek_paths::{SearchConfig, Variant};

/// Everything needed to set up a [`ReplanningSupervisor`](crate::ReplanningSupervisor).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub width: i32,
    pub height: i32,
    pub start: Coord,
    pub goal: Coord,
    /// Variant used by the first search; can be changed while idle.
    pub variant: Variant,
    /// Chance that a single tick spawns a dynamic obstacle.
    pub spawn_probability: f64,
    pub search: SearchConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            start: Coord::ZERO,
            goal: Coord::new(19, 19),
            variant: Variant::Bfs,
            spawn_probability: 0.015,
            search: SearchConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Check every field without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_search()?;
        self.build_grid().map(|_| ())
    }

    /// Build the empty grid described by this config.
    pub fn build_grid(&self) -> Result<Grid, ConfigError> {
        Ok(Grid::with_endpoints(
            self.width,
            self.height,
            self.start,
            self.goal,
        )?)
    }

    fn check_search(&self) -> Result<(), ConfigError> {
        let p = self.spawn_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::InvalidProbability(p));
        }
        if self.search.depth_limit == 0 {
            return Err(ConfigError::InvalidDepthLimit);
        }
        Ok(())
    }
}

/// A [`SessionConfig`] that cannot be used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Spawn probability outside `[0, 1]` (or NaN).
    InvalidProbability(f64),
    /// The depth limit must allow at least one edge.
    InvalidDepthLimit,
    /// Bad dimensions or endpoints.
    Grid(GridError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProbability(p) => {
                write!(f, "spawn probability {p} is not within [0, 1]")
            }
            Self::InvalidDepthLimit => f.write_str("depth limit must be at least 1"),
            Self::Grid(e) => write!(f, "invalid grid: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
