use stepseek_core::{Bounds, Coord};

use crate::engine::Step;
use crate::event::FailureReason;
use crate::traits::Pather;
use crate::tree::SearchTree;

/// Depth-first search with a LIFO frontier.
///
/// A cell's parent is fixed when it is first pushed, so no cell is pushed
/// twice. Neighbours are pushed in reverse so the first clockwise neighbour
/// is expanded first.
#[derive(Clone, Debug)]
pub(crate) struct Dfs {
    tree: SearchTree,
    stack: Vec<usize>,
    goal: Coord,
}

impl Dfs {
    pub(crate) fn new(bounds: Bounds, start: Coord, goal: Coord) -> Self {
        let tree = SearchTree::new(bounds, start);
        let stack = tree.idx(start).into_iter().collect();
        Self { tree, stack, goal }
    }

    pub(crate) fn step<P: Pather>(&mut self, pather: &P, nbuf: &mut Vec<Coord>) -> Step {
        let Some(ci) = self.stack.pop() else {
            return Step::Exhausted(FailureReason::NotFound);
        };
        let cp = self.tree.point(ci);
        if cp == self.goal {
            return Step::Found {
                expanded: cp,
                path: self.tree.path_to(ci),
            };
        }

        nbuf.clear();
        pather.neighbors(cp, nbuf);

        for &np in nbuf.iter().rev() {
            let Some(ni) = self.tree.idx(np) else {
                continue;
            };
            if self.tree.is_reached(ni) {
                continue;
            }
            self.tree.reach(ni, ci);
            self.stack.push(ni);
        }
        Step::Expanded(cp)
    }

    /// Frontier cells, next-to-expand first.
    pub(crate) fn frontier(&self) -> Vec<Coord> {
        self.stack.iter().rev().map(|&i| self.tree.point(i)).collect()
    }

    pub(crate) fn is_reached(&self, p: Coord) -> bool {
        self.tree.contains(p)
    }
}
