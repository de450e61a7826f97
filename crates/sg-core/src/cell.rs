//! Integer grid coordinate.
//!
//! Maps are laid out on the x/z plane; `y` is altitude and stays 0 for a
//! single-level map, but is carried so coordinates print and persist in the
//! same `(x, y, z)` shape the host uses.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// The eight neighbour offsets on the x/z plane: N, S, W, E, NW, NE, SW, SE.
pub const OFFSETS_8: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (1, 1),
    (-1, -1),
    (1, -1),
];

/// A single grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cell {
    /// Sentinel for "no cell".  Never in bounds of any map.
    pub const INVALID: Cell = Cell { x: -1000, y: -1000, z: -1000 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Shorthand for a ground-level cell.
    #[inline]
    pub const fn flat(x: i32, z: i32) -> Self {
        Self { x, y: 0, z }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }

    /// Straight-line distance on the x/z plane.
    pub fn distance_to(self, other: Cell) -> f32 {
        (self.distance_squared(other) as f32).sqrt()
    }

    /// Squared straight-line distance on the x/z plane.
    #[inline]
    pub fn distance_squared(self, other: Cell) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dz * dz
    }

    /// Chebyshev (L-inf) distance: the ring index of `other` around `self`.
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        (self.x - other.x).unsigned_abs().max((self.z - other.z).unsigned_abs())
    }

    /// `true` if `other` is one of the 8 cells around `self` (not `self`).
    #[inline]
    pub fn is_adjacent_8(self, other: Cell) -> bool {
        self.y == other.y && self.chebyshev(other) == 1
    }

    /// The 8 surrounding cells, unclipped.  Callers check bounds.
    pub fn adjacent_8(self) -> impl Iterator<Item = Cell> {
        OFFSETS_8
            .into_iter()
            .map(move |(dx, dz)| Cell::new(self.x + dx, self.y, self.z + dz))
    }

    /// One Chebyshev step from `self` toward `to`.  Returns `self` if equal.
    pub fn step_toward(self, to: Cell) -> Cell {
        Cell::new(
            self.x + (to.x - self.x).signum(),
            self.y,
            self.z + (to.z - self.z).signum(),
        )
    }
}

impl Add for Cell {
    type Output = Cell;
    #[inline]
    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
