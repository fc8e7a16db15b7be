//! **stepseek-core**: grid model for step-wise search visualisation.
//!
//! This crate provides the foundational types used across the *stepseek*
//! workspace: coordinates and movement directions, and the [`Grid`] that
//! classifies every cell as empty, wall, obstacle, start or goal.

pub mod error;
pub mod geom;
pub mod grid;

pub use error::GridError;
pub use geom::{Bounds, Coord, Direction};
pub use grid::{CellKind, DrawMode, Grid, Spawned};
