//! Cell eligibility and the searches built on it.
//!
//! Everything here reads the map through [`WorldMap`] and never mutates
//! it, so the results depend only on map state at call time (plus the
//! caller's RNG for landing tie-breaks).

use sg_core::{AgentId, Cell, SimRng};
use sg_world::{Thing, WorldMap, cells_within, ring_cells};
use tracing::{debug, trace};

/// `true` if `cell` may host a portal or receive a teleported agent.
///
/// Rejects cells that are out of bounds, not walkable, hold an impassable
/// structure, or hold any agent other than `allowed`.  `allowed` lets the
/// agent standing on its own entry cell place a portal under itself.
pub fn is_valid_portal_location<M: WorldMap + ?Sized>(
    cell:    Cell,
    map:     &M,
    allowed: Option<AgentId>,
) -> bool {
    if !map.in_bounds(cell) {
        trace!(%cell, "placement rejected: out of bounds");
        return false;
    }
    if !map.walkable(cell) {
        trace!(%cell, "placement rejected: not walkable");
        return false;
    }
    for &thing in map.things_at(cell) {
        match thing {
            Thing::Agent(a) if Some(a) != allowed => {
                trace!(%cell, agent = %a, "placement rejected: occupied");
                return false;
            }
            Thing::Structure(_) if map.is_impassable(thing) => {
                trace!(%cell, "placement rejected: impassable structure");
                return false;
            }
            _ => {}
        }
    }
    true
}

/// Nearest valid cell to `target`, searching rings `1..=radius` after the
/// target itself.
///
/// Falls back to `target` unchanged when nothing qualifies; the spawner's
/// own validation then decides whether the degraded placement is usable.
pub fn find_best_exit_position<M: WorldMap + ?Sized>(target: Cell, map: &M, radius: u32) -> Cell {
    match cells_within(target, radius).find(|&c| is_valid_portal_location(c, map, None)) {
        Some(cell) => cell,
        None => {
            debug!(%target, radius, "no valid exit cell in range; using target");
            target
        }
    }
}

/// Where an agent passing through `exit` should land.
///
/// The exit cell itself when it is valid; otherwise the straight-line
/// nearest valid cell within `radius`, never the exit cell, with ties
/// broken by `rng`.  `None` if nothing within `radius` qualifies.
pub fn find_landing_cell<M: WorldMap + ?Sized>(
    exit:   Cell,
    map:    &M,
    radius: u32,
    rng:    &mut SimRng,
) -> Option<Cell> {
    if is_valid_portal_location(exit, map, None) {
        return Some(exit);
    }

    let candidates: Vec<Cell> = (1..=radius)
        .flat_map(|r| ring_cells(exit, r))
        .filter(|&c| is_valid_portal_location(c, map, None))
        .collect();
    let best = candidates.iter().map(|c| c.distance_squared(exit)).min()?;
    let nearest: Vec<Cell> = candidates
        .into_iter()
        .filter(|c| c.distance_squared(exit) == best)
        .collect();
    rng.choose(&nearest).copied()
}
