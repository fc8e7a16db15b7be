use std::fmt;
use std::str::FromStr;

use stepseek_core::Bounds;

/// The six search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Variant {
    /// Breadth-first: FIFO frontier, fewest edges.
    #[default]
    Bfs,
    /// Depth-first: LIFO frontier, no optimality guarantee.
    Dfs,
    /// Uniform-cost: frontier ordered by cumulative cost.
    Ucs,
    /// Depth-limited depth-first search.
    Dls,
    /// Iterative-deepening depth-first search.
    Iddfs,
    /// Two breadth-first searches, from start and from goal.
    Bidirectional,
}

impl Variant {
    pub const ALL: [Variant; 6] = [
        Variant::Bfs,
        Variant::Dfs,
        Variant::Ucs,
        Variant::Dls,
        Variant::Iddfs,
        Variant::Bidirectional,
    ];

    /// Short display label.
    pub const fn label(self) -> &'static str {
        match self {
            Variant::Bfs => "BFS",
            Variant::Dfs => "DFS",
            Variant::Ucs => "UCS",
            Variant::Dls => "DLS",
            Variant::Iddfs => "IDDFS",
            Variant::Bidirectional => "Bidirectional",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown variant name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search variant \u{201c}{}\u{201d}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl FromStr for Variant {
    type Err = UnknownVariant;

    /// Case-insensitive match against the labels; `bidi` is accepted for
    /// the bidirectional search.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "bidi" {
            return Ok(Variant::Bidirectional);
        }
        Variant::ALL
            .into_iter()
            .find(|v| v.label().to_ascii_lowercase() == lower)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Default depth cutoff for depth-limited search.
pub const DEFAULT_DEPTH_LIMIT: usize = 15;

/// Tunables for the depth-bounded variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum path length, in edges, that DLS expands to.
    pub depth_limit: usize,
    /// Largest limit IDDFS tries. `None` uses the grid's absolute bound
    /// (see [`SearchConfig::iddfs_bound`]).
    pub iddfs_max_depth: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            iddfs_max_depth: None,
        }
    }
}

impl SearchConfig {
    /// Largest IDDFS limit for a grid with the given bounds: the configured
    /// maximum, or `cells - 1`, the longest simple path the grid can hold.
    pub fn iddfs_bound(&self, bounds: Bounds) -> usize {
        self.iddfs_max_depth
            .unwrap_or_else(|| bounds.len().saturating_sub(1))
    }
}
