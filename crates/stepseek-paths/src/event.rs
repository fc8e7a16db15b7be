use std::fmt;

use stepseek_core::Coord;

/// Why a search ended without a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureReason {
    /// The depth bound cut off at least one branch before the goal was
    /// found.
    DepthExceeded,
    /// Every reachable cell was expanded without finding the goal.
    NotFound,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthExceeded => f.write_str("depth limit exceeded"),
            Self::NotFound => f.write_str("no path"),
        }
    }
}

/// One entry of the event stream consumed by an animator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepEvent {
    /// A cell was expanded.
    NodeExplored(Coord),
    /// The step changed the frontier without expanding a cell. Carries the
    /// frontier after the step.
    FrontierUpdated(Vec<Coord>),
    /// The search reached the goal. `path` runs start to goal inclusive.
    PathFound { path: Vec<Coord>, cost: f64 },
    Failure(FailureReason),
    /// The active search was discarded and restarted on a changed grid.
    ReplanTriggered,
}

impl StepEvent {
    /// Whether the event ends a search.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PathFound { .. } | Self::Failure(_))
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_found_round_trip() {
        let ev = StepEvent::PathFound {
            path: vec![Coord::new(0, 0), Coord::new(1, 1)],
            cost: std::f64::consts::SQRT_2,
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: StepEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(ev, back);
    }
}
