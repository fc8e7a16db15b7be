//! [`Control`]: requests from the user interface, applied with
//! [`ReplanningSupervisor::update`](crate::ReplanningSupervisor::update).

use stepseek_core::{Coord, DrawMode};
use stepseek_paths::Variant;

/// A single control request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Control {
    /// Start when idle, otherwise pause or resume.
    ToggleRun,
    /// One step; honoured while idle or paused.
    StepForward,
    /// One step; honoured while running.
    Run,
    /// Drop the search and dynamic obstacles, keep walls.
    Reset,
    /// Drop the search, walls and obstacles.
    ClearWalls,
    /// Draw or erase a wall.
    Draw { cell: Coord, mode: DrawMode },
    /// Put an obstacle on a specific cell.
    PlaceObstacle(Coord),
    SetStart(Coord),
    SetGoal(Coord),
    SelectVariant(Variant),
    /// External clock tick: maybe spawn an obstacle.
    Tick,
}
