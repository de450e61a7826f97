//! Concentric ring enumeration around a cell.
//!
//! Ring `r` is every cell at Chebyshev distance exactly `r` from the centre:
//! 1 cell for `r = 0`, `8r` cells otherwise.  Within a ring, cells are
//! ordered nearest-first by straight-line distance with ties broken by
//! `(z, x)`, so the order is stable and an outward search always prefers
//! the orthogonal neighbours before the corners.

use sg_core::Cell;

/// All cells of ring `radius` around `center`, in search order.
///
/// Cells are not clipped to any map; callers bounds-check.
pub fn ring_cells(center: Cell, radius: u32) -> Vec<Cell> {
    if radius == 0 {
        return vec![center];
    }
    let r = i32::try_from(radius).unwrap_or(i32::MAX);
    let at = |dx: i32, dz: i32| Cell::new(center.x + dx, center.y, center.z + dz);
    let mut cells = Vec::with_capacity(8 * r as usize);
    // Top and bottom edges, then the sides without their corners.
    for d in -r..=r {
        cells.push(at(d, -r));
        cells.push(at(d, r));
    }
    for d in (1 - r)..r {
        cells.push(at(-r, d));
        cells.push(at(r, d));
    }
    cells.sort_by_key(|c| (c.distance_squared(center), c.z, c.x));
    cells
}

/// Rings `0..=radius` around `center`, innermost first.
pub fn cells_within(center: Cell, radius: u32) -> impl Iterator<Item = Cell> {
    (0..=radius).flat_map(move |r| ring_cells(center, r))
}
