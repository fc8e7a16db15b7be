//! Errors raised by grid mutations.

use std::fmt;

use crate::geom::Coord;

/// Errors that can occur when querying or mutating a [`Grid`](crate::Grid).
///
/// Every variant leaves the grid untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    InvalidCoordinate(Coord),
    /// The cell cannot take the requested classification (e.g. a wall
    /// on the start cell, or start and goal on the same cell).
    InvalidPlacement(Coord),
    /// A grid must hold at least two cells so start and goal differ.
    InvalidDimensions { width: i32, height: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(c) => write!(f, "coordinate {c} is outside the grid"),
            Self::InvalidPlacement(c) => write!(f, "cell {c} cannot be changed that way"),
            Self::InvalidDimensions { width, height } => {
                write!(f, "a {width}x{height} grid cannot hold both start and goal")
            }
        }
    }
}

impl std::error::Error for GridError {}
