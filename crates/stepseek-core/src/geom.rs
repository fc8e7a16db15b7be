//! Geometry primitives: [`Coord`], [`Bounds`] and [`Direction`].
//!
//! Coordinates are `(row, col)` pairs. Rows grow downwards, columns grow to
//! the right, and `(0, 0)` is the top-left cell.

use std::f64::consts::SQRT_2;
use std::fmt;
use std::ops::Sub;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A grid coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return the coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The neighbour one step away in direction `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.offset();
        self.shift(dr, dc)
    }

    /// Whether `other` is one of the eight cells surrounding `self`.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        let d = other - self;
        self != other && d.row.abs() <= 1 && d.col.abs() <= 1
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight movement directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Right,
    Bottom,
    BottomRight,
    BottomLeft,
    Left,
    TopLeft,
    TopRight,
}

impl Direction {
    /// Neighbour enumeration order shared by every search variant. This
    /// order is the only tie-break between otherwise equal candidates.
    pub const CLOCKWISE: [Direction; 8] = [
        Direction::Up,
        Direction::Right,
        Direction::Bottom,
        Direction::BottomRight,
        Direction::BottomLeft,
        Direction::Left,
        Direction::TopLeft,
        Direction::TopRight,
    ];

    /// `(drow, dcol)` offset of one step in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::BottomRight => (1, 1),
            Direction::BottomLeft => (1, -1),
            Direction::Left => (0, -1),
            Direction::TopLeft => (-1, -1),
            Direction::TopRight => (-1, 1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        let (dr, dc) = self.offset();
        dr != 0 && dc != 0
    }

    /// Traversal cost: 1 for cardinal moves, √2 for diagonal moves.
    #[inline]
    pub const fn cost(self) -> f64 {
        if self.is_diagonal() { SQRT_2 } else { 1.0 }
    }

    /// The direction leading from `from` to the adjacent cell `to`, if any.
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let d = to - from;
        Self::CLOCKWISE
            .into_iter()
            .find(|dir| dir.offset() == (d.row, d.col))
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The rectangle `[0, height) x [0, width)` covered by a grid, together
/// with the flat row-major indexing used for per-cell bookkeeping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    width: i32,
    height: i32,
}

impl Bounds {
    /// Create bounds for a `width` x `height` grid. Negative sizes clamp to
    /// zero.
    #[inline]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
        }
    }

    #[inline]
    pub fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> i32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether `c` lies inside the bounds.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= 0 && c.row < self.height && c.col >= 0 && c.col < self.width
    }

    /// Convert a coordinate to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.width as usize + c.col as usize)
    }

    /// Convert a flat index back to a coordinate.
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let w = self.width.max(1) as usize;
        Coord::new((idx / w) as i32, (idx % w) as i32)
    }

    /// Row-major iterator over every coordinate.
    #[inline]
    pub fn iter(self) -> impl Iterator<Item = Coord> {
        (0..self.len()).map(move |i| self.coord(i))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
