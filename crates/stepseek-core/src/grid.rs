//! The [`Grid`] model: cell classification, endpoint bookkeeping and
//! clockwise neighbour enumeration.

use std::fmt;

use rand::{Rng, RngExt};

use crate::error::GridError;
use crate::geom::{Bounds, Coord, Direction};

/// Classification of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Empty,
    /// Static wall drawn by the user.
    Wall,
    /// Obstacle spawned while a search is running.
    Obstacle,
    Start,
    Goal,
}

impl CellKind {
    /// Whether the cell cannot be entered.
    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, CellKind::Wall | CellKind::Obstacle)
    }

    /// Whether the cell is the start or the goal.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, CellKind::Start | CellKind::Goal)
    }

    /// Single-character form used by the text rendering.
    pub const fn symbol(self) -> char {
        match self {
            CellKind::Empty => '.',
            CellKind::Wall => '#',
            CellKind::Obstacle => 'D',
            CellKind::Start => 'S',
            CellKind::Goal => 'G',
        }
    }
}

/// What a wall-drawing gesture does to the target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DrawMode {
    #[default]
    Wall,
    Erase,
}

/// A dynamic obstacle placed by [`Grid::spawn_dynamic_obstacle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub cell: Coord,
    /// Whether the cell lies on the path handed to the spawn call.
    pub on_path: bool,
}

/// A fixed-size grid with exactly one start and one goal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Bounds,
    cells: Vec<CellKind>,
    start: Coord,
    goal: Coord,
}

impl Grid {
    /// Create an all-empty `width` x `height` grid with the start in the
    /// top-left corner and the goal in the bottom-right corner.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        Self::with_endpoints(
            width,
            height,
            Coord::ZERO,
            Coord::new(height - 1, width - 1),
        )
    }

    /// Create an all-empty grid with explicit start and goal cells.
    pub fn with_endpoints(
        width: i32,
        height: i32,
        start: Coord,
        goal: Coord,
    ) -> Result<Self, GridError> {
        let bounds = Bounds::new(width, height);
        if width <= 0 || height <= 0 || bounds.len() < 2 {
            return Err(GridError::InvalidDimensions { width, height });
        }
        if !bounds.contains(start) {
            return Err(GridError::InvalidCoordinate(start));
        }
        if !bounds.contains(goal) {
            return Err(GridError::InvalidCoordinate(goal));
        }
        if start == goal {
            return Err(GridError::InvalidPlacement(goal));
        }
        let mut grid = Self {
            bounds,
            cells: vec![CellKind::Empty; bounds.len()],
            start,
            goal,
        };
        grid.put(start, CellKind::Start);
        grid.put(goal, CellKind::Goal);
        Ok(grid)
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Coord {
        self.goal
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// Classification of the cell at `c`, or `None` if out of bounds.
    pub fn cell(&self, c: Coord) -> Option<CellKind> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Whether `c` is inside the grid and neither a wall nor an obstacle.
    #[inline]
    pub fn walkable(&self, c: Coord) -> bool {
        self.cell(c).is_some_and(|k| !k.is_blocked())
    }

    /// Count the cells with the given classification.
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|&&k| k == kind).count()
    }

    /// Iterate over `(Coord, CellKind)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &k)| (self.bounds.coord(i), k))
    }

    // -----------------------------------------------------------------------
    // Neighbours
    // -----------------------------------------------------------------------

    /// Walkable neighbours of `c` in clockwise order: Up, Right, Bottom,
    /// Bottom-Right, Bottom-Left, Left, Top-Left, Top-Right.
    pub fn neighbors_clockwise(&self, c: Coord) -> Vec<Coord> {
        let mut buf = Vec::with_capacity(8);
        self.fill_neighbors(c, &mut buf);
        buf
    }

    /// Append the walkable neighbours of `c` to `buf`, in clockwise order.
    /// The caller clears `buf` beforehand.
    pub fn fill_neighbors(&self, c: Coord, buf: &mut Vec<Coord>) {
        for dir in Direction::CLOCKWISE {
            let n = c.step(dir);
            if self.walkable(n) {
                buf.push(n);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    /// Move the start cell. The previous start becomes empty.
    pub fn set_start(&mut self, c: Coord) -> Result<(), GridError> {
        self.check(c)?;
        if c == self.goal {
            return Err(GridError::InvalidPlacement(c));
        }
        let old = self.start;
        self.put(old, CellKind::Empty);
        self.start = c;
        self.put(c, CellKind::Start);
        Ok(())
    }

    /// Move the goal cell. The previous goal becomes empty.
    pub fn set_goal(&mut self, c: Coord) -> Result<(), GridError> {
        self.check(c)?;
        if c == self.start {
            return Err(GridError::InvalidPlacement(c));
        }
        let old = self.goal;
        self.put(old, CellKind::Empty);
        self.goal = c;
        self.put(c, CellKind::Goal);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Walls and obstacles
    // -----------------------------------------------------------------------

    /// Draw or erase a wall at `c`. Returns whether the cell changed.
    ///
    /// Drawing replaces an obstacle with a wall; erasing only removes walls.
    pub fn toggle_wall(&mut self, c: Coord, mode: DrawMode) -> Result<bool, GridError> {
        let kind = self.check(c)?;
        if kind.is_endpoint() {
            return Err(GridError::InvalidPlacement(c));
        }
        let next = match (mode, kind) {
            (DrawMode::Wall, CellKind::Wall) => return Ok(false),
            (DrawMode::Wall, _) => CellKind::Wall,
            (DrawMode::Erase, CellKind::Wall) => CellKind::Empty,
            (DrawMode::Erase, _) => return Ok(false),
        };
        self.put(c, next);
        Ok(true)
    }

    /// Place an obstacle on an empty cell. Returns whether it was placed.
    pub fn place_obstacle(&mut self, c: Coord) -> Result<bool, GridError> {
        let kind = self.check(c)?;
        if kind.is_endpoint() {
            return Err(GridError::InvalidPlacement(c));
        }
        if kind != CellKind::Empty {
            return Ok(false);
        }
        self.put(c, CellKind::Obstacle);
        Ok(true)
    }

    /// Remove the obstacle at `c`. Returns whether one was removed.
    pub fn remove_obstacle(&mut self, c: Coord) -> Result<bool, GridError> {
        if self.check(c)? != CellKind::Obstacle {
            return Ok(false);
        }
        self.put(c, CellKind::Empty);
        Ok(true)
    }

    /// Turn an empty cell, chosen uniformly by `rng`, into an obstacle.
    ///
    /// `path` is the currently known route; the result reports whether the
    /// new obstacle sits on it. Returns `None` when no empty cell is left.
    pub fn spawn_dynamic_obstacle(
        &mut self,
        rng: &mut impl Rng,
        path: &[Coord],
    ) -> Option<Spawned> {
        let empty: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|&(_, &k)| k == CellKind::Empty)
            .map(|(i, _)| i)
            .collect();
        if empty.is_empty() {
            return None;
        }
        let idx = empty[rng.random_range(0..empty.len())];
        self.cells[idx] = CellKind::Obstacle;
        let cell = self.bounds.coord(idx);
        Some(Spawned {
            cell,
            on_path: path.contains(&cell),
        })
    }

    /// Remove every obstacle, keeping walls. Returns how many were removed.
    pub fn clear_obstacles(&mut self) -> usize {
        self.replace_all(|k| k == CellKind::Obstacle)
    }

    /// Remove every wall and obstacle. Returns how many cells were cleared.
    pub fn clear_walls(&mut self) -> usize {
        self.replace_all(CellKind::is_blocked)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn check(&self, c: Coord) -> Result<CellKind, GridError> {
        self.cell(c).ok_or(GridError::InvalidCoordinate(c))
    }

    fn put(&mut self, c: Coord, kind: CellKind) {
        if let Some(i) = self.bounds.index(c) {
            self.cells[i] = kind;
        }
    }

    fn replace_all(&mut self, pred: impl Fn(CellKind) -> bool) -> usize {
        let mut n = 0;
        for k in self.cells.iter_mut().filter(|k| pred(**k)) {
            *k = CellKind::Empty;
            n += 1;
        }
        n
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.bounds.width() as usize).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, k) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", k.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid10() -> Grid {
        Grid::with_endpoints(10, 10, Coord::new(0, 0), Coord::new(9, 9)).unwrap()
    }

    #[test]
    fn new_places_endpoints() {
        let g = Grid::new(5, 4).unwrap();
        assert_eq!(g.start(), Coord::new(0, 0));
        assert_eq!(g.goal(), Coord::new(3, 4));
        assert_eq!(g.cell(g.start()), Some(CellKind::Start));
        assert_eq!(g.cell(g.goal()), Some(CellKind::Goal));
        assert_eq!(g.count(CellKind::Empty), 18);
    }

    #[test]
    fn rejects_tiny_grids() {
        assert_eq!(
            Grid::new(1, 1),
            Err(GridError::InvalidDimensions { width: 1, height: 1 })
        );
        assert!(Grid::new(0, 5).is_err());
        assert!(Grid::new(2, 1).is_ok());
    }

    #[test]
    fn rejects_extreme_dimensions() {
        assert_eq!(
            Grid::new(5, i32::MIN),
            Err(GridError::InvalidDimensions {
                width: 5,
                height: i32::MIN
            })
        );
        assert_eq!(
            Grid::new(i32::MIN, 0),
            Err(GridError::InvalidDimensions {
                width: i32::MIN,
                height: 0
            })
        );
    }

    #[test]
    fn set_start_out_of_bounds() {
        let mut g = grid10();
        let bad = Coord::new(10, 0);
        assert_eq!(g.set_start(bad), Err(GridError::InvalidCoordinate(bad)));
        assert_eq!(g.start(), Coord::new(0, 0));
    }

    #[test]
    fn set_start_moves_and_clears_old() {
        let mut g = grid10();
        g.set_start(Coord::new(2, 3)).unwrap();
        assert_eq!(g.cell(Coord::new(0, 0)), Some(CellKind::Empty));
        assert_eq!(g.cell(Coord::new(2, 3)), Some(CellKind::Start));
        assert_eq!(g.count(CellKind::Start), 1);
    }

    #[test]
    fn start_cannot_overwrite_goal() {
        let mut g = grid10();
        assert_eq!(
            g.set_start(Coord::new(9, 9)),
            Err(GridError::InvalidPlacement(Coord::new(9, 9)))
        );
        assert_eq!(
            g.set_goal(Coord::new(0, 0)),
            Err(GridError::InvalidPlacement(Coord::new(0, 0)))
        );
        assert_eq!(g.count(CellKind::Start), 1);
        assert_eq!(g.count(CellKind::Goal), 1);
    }

    #[test]
    fn wall_on_endpoint_is_rejected() {
        let mut g = grid10();
        assert_eq!(
            g.toggle_wall(Coord::new(0, 0), DrawMode::Wall),
            Err(GridError::InvalidPlacement(Coord::new(0, 0)))
        );
        assert_eq!(g.cell(Coord::new(0, 0)), Some(CellKind::Start));
    }

    #[test]
    fn draw_and_erase_wall() {
        let mut g = grid10();
        let c = Coord::new(1, 1);
        assert_eq!(g.toggle_wall(c, DrawMode::Wall), Ok(true));
        assert_eq!(g.toggle_wall(c, DrawMode::Wall), Ok(false));
        assert!(!g.walkable(c));
        assert_eq!(g.toggle_wall(c, DrawMode::Erase), Ok(true));
        assert!(g.walkable(c));
    }

    #[test]
    fn erase_leaves_obstacles() {
        let mut g = grid10();
        let c = Coord::new(4, 4);
        assert_eq!(g.place_obstacle(c), Ok(true));
        assert_eq!(g.toggle_wall(c, DrawMode::Erase), Ok(false));
        assert_eq!(g.cell(c), Some(CellKind::Obstacle));
    }

    #[test]
    fn obstacle_lifecycle() {
        let mut g = grid10();
        let c = Coord::new(5, 5);
        assert_eq!(g.place_obstacle(c), Ok(true));
        assert!(!g.walkable(c));
        assert_eq!(g.remove_obstacle(c), Ok(true));
        assert!(g.walkable(c));
        assert_eq!(g.remove_obstacle(c), Ok(false));
    }

    #[test]
    fn corner_neighbors_skip_wall() {
        let mut g = grid10();
        g.toggle_wall(Coord::new(1, 1), DrawMode::Wall).unwrap();
        assert_eq!(
            g.neighbors_clockwise(Coord::new(0, 0)),
            vec![Coord::new(0, 1), Coord::new(1, 0)]
        );
    }

    #[test]
    fn center_neighbors_full_order() {
        let g = grid10();
        let n = g.neighbors_clockwise(Coord::new(5, 5));
        assert_eq!(n.len(), 8);
        assert_eq!(n[0], Coord::new(4, 5));
        assert_eq!(n[7], Coord::new(4, 6));
    }

    #[test]
    fn edge_neighbors_keep_relative_order() {
        let mut g = grid10();
        // Bottom edge, with the Left neighbour blocked.
        g.place_obstacle(Coord::new(9, 3)).unwrap();
        assert_eq!(
            g.neighbors_clockwise(Coord::new(9, 4)),
            vec![Coord::new(8, 4), Coord::new(9, 5), Coord::new(8, 3), Coord::new(8, 5)]
        );
    }

    #[test]
    fn spawn_uses_only_empty_cells() {
        let mut g = Grid::new(3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let s = g.spawn_dynamic_obstacle(&mut rng, &[]).unwrap();
        assert_eq!(s.cell, Coord::new(0, 1));
        assert!(!s.on_path);
        assert_eq!(g.spawn_dynamic_obstacle(&mut rng, &[]), None);
    }

    #[test]
    fn spawn_reports_path_hit() {
        let mut g = Grid::new(3, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let path = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)];
        let s = g.spawn_dynamic_obstacle(&mut rng, &path).unwrap();
        assert!(s.on_path);
    }

    #[test]
    fn clear_obstacles_keeps_walls() {
        let mut g = grid10();
        g.toggle_wall(Coord::new(2, 2), DrawMode::Wall).unwrap();
        g.place_obstacle(Coord::new(3, 3)).unwrap();
        assert_eq!(g.clear_obstacles(), 1);
        assert_eq!(g.count(CellKind::Wall), 1);
        assert_eq!(g.clear_walls(), 1);
        assert_eq!(g.count(CellKind::Wall), 0);
    }

    #[test]
    fn display_symbols() {
        let mut g = Grid::new(3, 2).unwrap();
        g.toggle_wall(Coord::new(0, 1), DrawMode::Wall).unwrap();
        g.place_obstacle(Coord::new(1, 0)).unwrap();
        assert_eq!(g.to_string(), "S # .\nD . G");
    }

    #[test]
    fn iter_row_major() {
        let g = Grid::new(2, 2).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], (Coord::new(0, 0), CellKind::Start));
        assert_eq!(items[3], (Coord::new(1, 1), CellKind::Goal));
    }
}
