use stepseek_core::{Bounds, Coord};

/// Parent index of a root node.
pub(crate) const NONE: usize = usize::MAX;

/// Flat per-cell bookkeeping shared by every variant: which cells have been
/// reached and the parent link each one was reached through.
#[derive(Clone, Debug)]
pub(crate) struct SearchTree {
    pub(crate) bounds: Bounds,
    parent: Vec<usize>,
    reached: Vec<bool>,
}

impl SearchTree {
    /// Create an empty tree rooted at `root`.
    pub(crate) fn new(bounds: Bounds, root: Coord) -> Self {
        let len = bounds.len();
        let mut tree = Self {
            bounds,
            parent: vec![NONE; len],
            reached: vec![false; len],
        };
        if let Some(ri) = bounds.index(root) {
            tree.reached[ri] = true;
        }
        tree
    }

    #[inline]
    pub(crate) fn idx(&self, p: Coord) -> Option<usize> {
        self.bounds.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Coord {
        self.bounds.coord(idx)
    }

    #[inline]
    pub(crate) fn is_reached(&self, idx: usize) -> bool {
        self.reached[idx]
    }

    /// Whether `p` has been reached. Out-of-bounds points never are.
    pub(crate) fn contains(&self, p: Coord) -> bool {
        self.idx(p).is_some_and(|i| self.reached[i])
    }

    /// Mark `idx` reached through `parent`.
    #[inline]
    pub(crate) fn reach(&mut self, idx: usize, parent: usize) {
        self.reached[idx] = true;
        self.parent[idx] = parent;
    }

    /// Mark `idx` reached without fixing its parent yet.
    #[inline]
    pub(crate) fn mark(&mut self, idx: usize) {
        self.reached[idx] = true;
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, idx: usize, parent: usize) {
        self.parent[idx] = parent;
    }

    #[inline]
    pub(crate) fn parent(&self, idx: usize) -> usize {
        self.parent[idx]
    }

    /// Walk parent links from `idx` back to the root and return the path in
    /// root-to-`idx` order.
    pub(crate) fn path_to(&self, idx: usize) -> Vec<Coord> {
        let mut path = Vec::new();
        let mut ci = idx;
        while ci != NONE {
            path.push(self.point(ci));
            ci = self.parent[ci];
        }
        path.reverse();
        path
    }
}
