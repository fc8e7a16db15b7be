use stepseek_core::{Coord, Direction, Grid};

/// Minimal search interface: provides neighbour enumeration.
pub trait Pather {
    /// Append neighbours of `p` into `buf`, in the order they should be
    /// considered. The caller clears `buf` before calling.
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>);
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Coord, to: Coord) -> f64;
}

impl Pather for Grid {
    #[inline]
    fn neighbors(&self, p: Coord, buf: &mut Vec<Coord>) {
        self.fill_neighbors(p, buf);
    }
}

impl WeightedPather for Grid {
    /// 1 for cardinal steps, √2 for diagonal steps.
    #[inline]
    fn cost(&self, from: Coord, to: Coord) -> f64 {
        Direction::between(from, to).map_or(f64::INFINITY, Direction::cost)
    }
}

/// Total cost of walking `path` under `pather`'s edge costs.
pub fn path_cost<P: WeightedPather>(pather: &P, path: &[Coord]) -> f64 {
    path.windows(2).map(|w| pather.cost(w[0], w[1])).sum()
}
