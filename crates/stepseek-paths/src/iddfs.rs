use stepseek_core::{Bounds, Coord};

use crate::dls::Dls;
use crate::engine::Step;
use crate::event::FailureReason;
use crate::traits::Pather;

/// Iterative deepening: depth-limited passes with limits 0, 1, 2, ...
///
/// Each step advances the current pass by one expansion. A pass that ends
/// with a cutoff starts the next one; a pass that ends without a cutoff, or
/// a limit past `max_depth`, ends the search.
#[derive(Clone, Debug)]
pub(crate) struct Iddfs {
    bounds: Bounds,
    start: Coord,
    goal: Coord,
    max_depth: usize,
    pass: Dls,
}

impl Iddfs {
    pub(crate) fn new(bounds: Bounds, start: Coord, goal: Coord, max_depth: usize) -> Self {
        Self {
            bounds,
            start,
            goal,
            max_depth,
            pass: Dls::new(bounds, start, goal, 0),
        }
    }

    /// Limit of the pass in progress.
    #[inline]
    pub(crate) fn limit(&self) -> usize {
        self.pass.limit()
    }

    pub(crate) fn step<P: Pather>(&mut self, pather: &P, nbuf: &mut Vec<Coord>) -> Step {
        match self.pass.step(pather, nbuf) {
            Step::Exhausted(FailureReason::DepthExceeded) => {
                let next = self.pass.limit() + 1;
                if next > self.max_depth {
                    return Step::Exhausted(FailureReason::NotFound);
                }
                log::trace!("iddfs: pass with limit {} cut off, deepening to {next}", next - 1);
                self.pass = Dls::new(self.bounds, self.start, self.goal, next);
                Step::Skipped
            }
            other => other,
        }
    }

    pub(crate) fn frontier(&self) -> Vec<Coord> {
        self.pass.frontier()
    }

    pub(crate) fn is_reached(&self, p: Coord) -> bool {
        self.pass.is_reached(p)
    }
}
