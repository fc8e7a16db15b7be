use std::collections::VecDeque;

use stepseek_core::{Bounds, Coord};

use crate::engine::Step;
use crate::event::FailureReason;
use crate::traits::Pather;
use crate::tree::{NONE, SearchTree};

/// One direction of a bidirectional search.
#[derive(Clone, Debug)]
struct Side {
    tree: SearchTree,
    queue: VecDeque<usize>,
}

impl Side {
    fn new(bounds: Bounds, root: Coord) -> Self {
        let tree = SearchTree::new(bounds, root);
        let queue = tree.idx(root).into_iter().collect();
        Self { tree, queue }
    }
}

/// Two breadth-first searches, one from the start and one from the goal,
/// taking turns one expansion at a time. The search ends at the first cell
/// reached by both.
#[derive(Clone, Debug)]
pub(crate) struct Bidirectional {
    forward: Side,
    backward: Side,
    forward_turn: bool,
}

impl Bidirectional {
    pub(crate) fn new(bounds: Bounds, start: Coord, goal: Coord) -> Self {
        Self {
            forward: Side::new(bounds, start),
            backward: Side::new(bounds, goal),
            forward_turn: true,
        }
    }

    pub(crate) fn step<P: Pather>(&mut self, pather: &P, nbuf: &mut Vec<Coord>) -> Step {
        let (this, other) = if self.forward_turn {
            (&mut self.forward, &self.backward)
        } else {
            (&mut self.backward, &self.forward)
        };
        self.forward_turn = !self.forward_turn;

        // Either side running dry means its component never touched the
        // other side's.
        let Some(ci) = this.queue.pop_front() else {
            return Step::Exhausted(FailureReason::NotFound);
        };
        let cp = this.tree.point(ci);

        nbuf.clear();
        pather.neighbors(cp, nbuf);

        let mut meeting = None;
        for &np in nbuf.iter() {
            let Some(ni) = this.tree.idx(np) else {
                continue;
            };
            if this.tree.is_reached(ni) {
                continue;
            }
            this.tree.reach(ni, ci);
            this.queue.push_back(ni);
            if other.tree.is_reached(ni) {
                meeting = Some(ni);
                break;
            }
        }

        match meeting {
            Some(mi) => Step::Found {
                expanded: cp,
                path: self.join(mi),
            },
            None => Step::Expanded(cp),
        }
    }

    /// Forward path to the meeting cell followed by the backward path from
    /// it to the goal.
    fn join(&self, meeting: usize) -> Vec<Coord> {
        let mut path = self.forward.tree.path_to(meeting);
        let mut ci = self.backward.tree.parent(meeting);
        while ci != NONE {
            path.push(self.backward.tree.point(ci));
            ci = self.backward.tree.parent(ci);
        }
        path
    }

    pub(crate) fn frontier(&self) -> Vec<Coord> {
        self.forward
            .queue
            .iter()
            .map(|&i| self.forward.tree.point(i))
            .chain(self.backward.queue.iter().map(|&i| self.backward.tree.point(i)))
            .collect()
    }

    pub(crate) fn is_reached(&self, p: Coord) -> bool {
        self.forward.tree.contains(p) || self.backward.tree.contains(p)
    }
}
