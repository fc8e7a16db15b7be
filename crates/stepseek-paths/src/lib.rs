//! Resumable uninformed search on 2D grids.
//!
//! Every algorithm advances by exactly one expansion per call to
//! [`SearchEngine::step`], so a caller can animate the search frame by frame
//! and change the grid between frames:
//!
//! - **Breadth-first** ([`Variant::Bfs`]): FIFO frontier, fewest edges
//! - **Depth-first** ([`Variant::Dfs`]): LIFO frontier
//! - **Uniform-cost** ([`Variant::Ucs`]): cheapest first, diagonal moves cost √2
//! - **Depth-limited** ([`Variant::Dls`]): depth-first up to [`SearchConfig::depth_limit`]
//! - **Iterative deepening** ([`Variant::Iddfs`]): depth-limited passes with growing limits
//! - **Bidirectional** ([`Variant::Bidirectional`]): breadth-first from both ends
//!
//! Ties between equally good candidates are always broken by the clockwise
//! neighbour order of [`Direction::CLOCKWISE`](stepseek_core::Direction::CLOCKWISE).
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration (all variants) |
//! | [`WeightedPather`] : [`Pather`] | uniform-cost ordering, reported path cost |

mod bfs;
mod bidir;
mod dfs;
mod dls;
mod engine;
mod event;
mod iddfs;
mod queue;
mod traits;
mod tree;
mod ucs;
mod variant;

pub use engine::SearchEngine;
pub use event::{FailureReason, StepEvent};
pub use queue::CostQueue;
pub use traits::{Pather, WeightedPather, path_cost};
pub use variant::{DEFAULT_DEPTH_LIMIT, SearchConfig, UnknownVariant, Variant};
