//! Error types for the control layer.

use std::fmt;

use stepseek_core::GridError;

use crate::controller::RunState;

/// A control request that the current [`RunState`] does not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// `request` is not a valid transition out of `from`.
    InvalidTransition {
        from: RunState,
        request: &'static str,
    },
    /// The variant can only change while no search exists; reset first.
    SearchActive,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { from, request } => {
                write!(f, "cannot {request} while {from}")
            }
            Self::SearchActive => f.write_str("a search is active; reset before changing variant"),
        }
    }
}

impl std::error::Error for ControlError {}

/// Errors surfaced by the supervisor's control surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Grid(GridError),
    Control(ControlError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Control(e) => write!(f, "control: {e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            Self::Control(e) => Some(e),
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

impl From<ControlError> for SessionError {
    fn from(e: ControlError) -> Self {
        Self::Control(e)
    }
}
