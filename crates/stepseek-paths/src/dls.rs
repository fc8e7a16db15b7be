use stepseek_core::{Bounds, Coord};

use crate::engine::Step;
use crate::event::FailureReason;
use crate::traits::Pather;
use crate::tree::{NONE, SearchTree};

/// A pending expansion on the depth-limited stack.
#[derive(Clone, Copy, Debug)]
struct Frame {
    idx: usize,
    depth: usize,
    parent: usize,
}

/// Depth-limited depth-first search.
///
/// A cell is expanded again only when it is reached at a strictly smaller
/// depth than before, so every goal within `limit` edges of the start is
/// found. The parent link is taken from the frame at expansion time, which
/// keeps recorded depths strictly decreasing along every parent chain.
///
/// Whether the bound cut anything off is decided once the stack runs dry: a
/// cell expanded at the limit counts as a cutoff only if one of its
/// neighbours was never expanded at all.
#[derive(Clone, Debug)]
pub(crate) struct Dls {
    tree: SearchTree,
    stack: Vec<Frame>,
    /// Shallowest depth each cell was expanded at (`usize::MAX` = never).
    depth: Vec<usize>,
    limit: usize,
    goal: Coord,
    /// Cells expanded at the limit, each at most once.
    edge: Vec<usize>,
}

impl Dls {
    pub(crate) fn new(bounds: Bounds, start: Coord, goal: Coord, limit: usize) -> Self {
        let tree = SearchTree::new(bounds, start);
        let stack = tree
            .idx(start)
            .map(|si| Frame {
                idx: si,
                depth: 0,
                parent: NONE,
            })
            .into_iter()
            .collect();
        Self {
            tree,
            stack,
            depth: vec![usize::MAX; bounds.len()],
            limit,
            goal,
            edge: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn limit(&self) -> usize {
        self.limit
    }

    pub(crate) fn step<P: Pather>(&mut self, pather: &P, nbuf: &mut Vec<Coord>) -> Step {
        let Some(f) = self.stack.pop() else {
            return Step::Exhausted(self.exhausted(pather, nbuf));
        };
        if f.depth >= self.depth[f.idx] {
            return Step::Skipped;
        }
        self.depth[f.idx] = f.depth;
        self.tree.set_parent(f.idx, f.parent);

        let cp = self.tree.point(f.idx);
        if cp == self.goal {
            return Step::Found {
                expanded: cp,
                path: self.tree.path_to(f.idx),
            };
        }

        if f.depth >= self.limit {
            self.edge.push(f.idx);
            return Step::Expanded(cp);
        }

        nbuf.clear();
        pather.neighbors(cp, nbuf);

        let nd = f.depth + 1;
        for &np in nbuf.iter().rev() {
            let Some(ni) = self.tree.idx(np) else {
                continue;
            };
            if nd >= self.depth[ni] {
                continue;
            }
            self.tree.mark(ni);
            self.stack.push(Frame {
                idx: ni,
                depth: nd,
                parent: f.idx,
            });
        }
        Step::Expanded(cp)
    }

    /// Failure reason once the stack is empty: `DepthExceeded` if some cell
    /// at the limit still has a neighbour that was never expanded.
    fn exhausted<P: Pather>(&self, pather: &P, nbuf: &mut Vec<Coord>) -> FailureReason {
        for &ci in &self.edge {
            nbuf.clear();
            pather.neighbors(self.tree.point(ci), nbuf);
            let cut = nbuf
                .iter()
                .filter_map(|&np| self.tree.idx(np))
                .any(|ni| self.depth[ni] == usize::MAX);
            if cut {
                return FailureReason::DepthExceeded;
            }
        }
        FailureReason::NotFound
    }

    /// Live stack entries, next-to-expand first.
    pub(crate) fn frontier(&self) -> Vec<Coord> {
        self.stack
            .iter()
            .rev()
            .filter(|f| f.depth < self.depth[f.idx])
            .map(|f| self.tree.point(f.idx))
            .collect()
    }

    pub(crate) fn is_reached(&self, p: Coord) -> bool {
        self.tree.contains(p)
    }
}
