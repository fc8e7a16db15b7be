use stepseek_core::{Bounds, Coord};

use crate::engine::Step;
use crate::event::FailureReason;
use crate::queue::CostQueue;
use crate::traits::WeightedPather;
use crate::tree::SearchTree;

/// Fixed-point resolution of accumulated costs: one cardinal move is
/// `COST_SCALE` units.
const COST_SCALE: f64 = 1e9;

/// Edge cost in integer units. Summing integers is exact, so routes with
/// the same moves in a different order tie and fall back to insertion order.
fn fixed_cost(cost: f64) -> u64 {
    if cost.is_finite() && cost >= 0.0 {
        (cost * COST_SCALE).round() as u64
    } else {
        u64::MAX
    }
}

/// Uniform-cost search: expands the cheapest frontier cell, ties broken by
/// insertion order.
#[derive(Clone, Debug)]
pub(crate) struct Ucs {
    tree: SearchTree,
    open: CostQueue<usize>,
    best: Vec<u64>,
    closed: Vec<bool>,
    goal: Coord,
}

impl Ucs {
    pub(crate) fn new(bounds: Bounds, start: Coord, goal: Coord) -> Self {
        let tree = SearchTree::new(bounds, start);
        let mut best = vec![u64::MAX; bounds.len()];
        let mut open = CostQueue::new();
        if let Some(si) = tree.idx(start) {
            best[si] = 0;
            open.push(si, 0);
        }
        Self {
            tree,
            open,
            best,
            closed: vec![false; bounds.len()],
            goal,
        }
    }

    /// Pop the cheapest entry. Entries for already-closed cells are stale:
    /// the step consumes them without expanding anything.
    pub(crate) fn step<P: WeightedPather>(&mut self, pather: &P, nbuf: &mut Vec<Coord>) -> Step {
        let Some(ci) = self.open.pop() else {
            return Step::Exhausted(FailureReason::NotFound);
        };
        if self.closed[ci] {
            return Step::Skipped;
        }
        self.closed[ci] = true;

        let cp = self.tree.point(ci);
        if cp == self.goal {
            return Step::Found {
                expanded: cp,
                path: self.tree.path_to(ci),
            };
        }

        let current = self.best[ci];
        nbuf.clear();
        pather.neighbors(cp, nbuf);

        for &np in nbuf.iter() {
            let Some(ni) = self.tree.idx(np) else {
                continue;
            };
            if self.closed[ni] {
                continue;
            }
            let tentative = current.saturating_add(fixed_cost(pather.cost(cp, np)));
            if tentative >= self.best[ni] {
                continue;
            }
            self.best[ni] = tentative;
            self.tree.reach(ni, ci);
            self.open.push(ni, tentative);
        }
        Step::Expanded(cp)
    }

    /// Open cells in expansion order, one entry per cell.
    pub(crate) fn frontier(&self) -> Vec<Coord> {
        let mut seen = vec![false; self.closed.len()];
        let mut out = Vec::new();
        for &i in self.open.ordered() {
            if self.closed[i] || seen[i] {
                continue;
            }
            seen[i] = true;
            out.push(self.tree.point(i));
        }
        out
    }

    pub(crate) fn is_reached(&self, p: Coord) -> bool {
        self.tree.contains(p)
    }
}
