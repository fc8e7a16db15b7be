use std::fmt;

use stepseek_paths::{SearchEngine, StepEvent};

/// Counters for the current run, as shown next to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Engine steps since the last reset, replans included.
    pub steps: usize,
    /// Distinct cells expanded by the current search.
    pub explored: usize,
    /// Cells waiting on the current frontier.
    pub frontier: usize,
    /// Number of cells in the found path, start and goal included.
    pub path_len: Option<usize>,
    pub path_cost: Option<f64>,
    pub replans: usize,
}

impl RunStats {
    pub(crate) fn collect(engine: Option<&SearchEngine>, steps: usize, replans: usize) -> Self {
        let mut stats = Self {
            steps,
            replans,
            ..Self::default()
        };
        let Some(engine) = engine else {
            return stats;
        };
        stats.explored = engine.explored().len();
        stats.frontier = engine.frontier().len();
        if let Some(StepEvent::PathFound { path, cost }) = engine.outcome() {
            stats.path_len = Some(path.len());
            stats.path_cost = Some(*cost);
        }
        stats
    }
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "steps {}, explored {}, frontier {}, replans {}",
            self.steps, self.explored, self.frontier, self.replans
        )?;
        match (self.path_len, self.path_cost) {
            (Some(len), Some(cost)) => write!(f, ", path {len} cells (cost {cost:.3})"),
            _ => f.write_str(", no path"),
        }
    }
}
