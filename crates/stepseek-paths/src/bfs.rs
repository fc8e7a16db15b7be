use std::collections::VecDeque;

use stepseek_core::{Bounds, Coord};

use crate::engine::Step;
use crate::event::FailureReason;
use crate::traits::Pather;
use crate::tree::SearchTree;

/// Breadth-first search with a FIFO frontier.
#[derive(Clone, Debug)]
pub(crate) struct Bfs {
    tree: SearchTree,
    queue: VecDeque<usize>,
    goal: Coord,
}

impl Bfs {
    pub(crate) fn new(bounds: Bounds, start: Coord, goal: Coord) -> Self {
        let tree = SearchTree::new(bounds, start);
        let mut queue = VecDeque::new();
        if let Some(si) = tree.idx(start) {
            queue.push_back(si);
        }
        Self { tree, queue, goal }
    }

    /// Expand the oldest frontier cell.
    pub(crate) fn step<P: Pather>(&mut self, pather: &P, nbuf: &mut Vec<Coord>) -> Step {
        let Some(ci) = self.queue.pop_front() else {
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

        for &np in nbuf.iter() {
            let Some(ni) = self.tree.idx(np) else {
                continue;
            };
            if self.tree.is_reached(ni) {
                continue;
            }
            self.tree.reach(ni, ci);
            self.queue.push_back(ni);
        }
        Step::Expanded(cp)
    }

    pub(crate) fn frontier(&self) -> Vec<Coord> {
        self.queue.iter().map(|&i| self.tree.point(i)).collect()
    }

    pub(crate) fn is_reached(&self, p: Coord) -> bool {
        self.tree.contains(p)
    }
}
