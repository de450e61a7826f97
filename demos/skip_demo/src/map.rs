//! The demo colony map.
//!
//! A 64×40 field split by a north–south wall at x = 32 with a single gap
//! near the top edge.  The west half is the colony; the east half holds a
//! storage yard.  Everything east of the wall starts fogged.

use sg_core::Cell;
use sg_world::{GridMap, WorldResult};

pub const WIDTH: u32 = 64;
pub const HEIGHT: u32 = 40;

/// The gap in the dividing wall.
pub const GAP: Cell = Cell::flat(32, 37);

/// Build the demo map.
pub fn build_map() -> WorldResult<GridMap> {
    let mut map = GridMap::new(WIDTH, HEIGHT)?;
    map.set_player_home(true);

    map.add_wall(Cell::flat(32, 0), Cell::flat(32, GAP.z - 1))?;
    map.add_wall(Cell::flat(32, GAP.z + 1), Cell::flat(32, HEIGHT as i32 - 1))?;

    // A pond the straight-line walk from the yard would cross.
    for z in 10..=14 {
        for x in 44..=50 {
            map.set_walkable(Cell::flat(x, z), false)?;
        }
    }
    map.add_structure("Shelf", false, Cell::flat(58, 20))?;

    for z in 0..HEIGHT as i32 {
        for x in 33..WIDTH as i32 {
            map.set_fogged(Cell::flat(x, z), true)?;
        }
    }
    Ok(map)
}
