//! Unit tests for sg-world.

use sg_core::{AgentId, Cell, PortalId};

use crate::{GridMap, Thing, WorldMap};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn open_map(w: u32, h: u32) -> GridMap {
    GridMap::new(w, h).unwrap()
}

// ── GridMap ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod map_tests {
    use super::*;
    use crate::WorldError;

    #[test]
    fn empty_dimensions_rejected() {
        assert!(matches!(GridMap::new(0, 4), Err(WorldError::EmptyMap)));
    }

    #[test]
    fn bounds() {
        let m = open_map(10, 5);
        assert!(m.in_bounds(Cell::flat(0, 0)));
        assert!(m.in_bounds(Cell::flat(9, 4)));
        assert!(!m.in_bounds(Cell::flat(10, 0)));
        assert!(!m.in_bounds(Cell::flat(0, 5)));
        assert!(!m.in_bounds(Cell::flat(-1, 0)));
        assert!(!m.in_bounds(Cell::new(0, 1, 0)));
        assert!(!m.in_bounds(Cell::INVALID));
        assert!(!m.walkable(Cell::flat(10, 0)));
    }

    #[test]
    fn spawn_and_despawn_keep_indexes_in_step() {
        let mut m = open_map(4, 4);
        let a = Thing::Agent(AgentId(0));
        m.spawn_thing(a, Cell::flat(1, 2)).unwrap();
        assert_eq!(m.things_at(Cell::flat(1, 2)), &[a]);
        assert_eq!(m.position_of(a), Some(Cell::flat(1, 2)));
        assert!(matches!(m.spawn_thing(a, Cell::flat(0, 0)), Err(WorldError::AlreadySpawned(_))));

        assert_eq!(m.despawn_thing(a), Some(Cell::flat(1, 2)));
        assert!(m.things_at(Cell::flat(1, 2)).is_empty());
        assert_eq!(m.despawn_thing(a), None);
    }

    #[test]
    fn spawn_out_of_bounds_rejected() {
        let mut m = open_map(4, 4);
        let p = Thing::Portal(PortalId(0));
        assert!(matches!(m.spawn_thing(p, Cell::flat(4, 0)), Err(WorldError::OutOfBounds(_))));
        assert!(!m.is_spawned(p));
    }

    #[test]
    fn failed_move_leaves_thing_in_place() {
        let mut m = open_map(4, 4);
        let a = Thing::Agent(AgentId(0));
        m.spawn_thing(a, Cell::flat(1, 1)).unwrap();
        assert!(m.move_thing(a, Cell::flat(9, 9)).is_err());
        assert_eq!(m.position_of(a), Some(Cell::flat(1, 1)));
        assert_eq!(m.move_thing(a, Cell::flat(2, 2)).unwrap(), Cell::flat(1, 1));
        assert_eq!(m.agents_at(Cell::flat(2, 2)).collect::<Vec<_>>(), [AgentId(0)]);
    }

    #[test]
    fn walls_are_impassable_structures() {
        let mut m = open_map(8, 8);
        m.add_wall(Cell::flat(2, 0), Cell::flat(2, 3)).unwrap();
        for z in 0..=3 {
            let things = m.things_at(Cell::flat(2, z));
            assert_eq!(things.len(), 1);
            assert!(m.is_impassable(things[0]));
        }
        assert!(m.things_at(Cell::flat(2, 4)).is_empty());
    }

    #[test]
    fn passable_structure_is_not_impassable() {
        let mut m = open_map(4, 4);
        let id = m.add_structure("Chair", false, Cell::flat(1, 1)).unwrap();
        assert!(!m.is_impassable(Thing::Structure(id)));
        assert_eq!(m.structure(id).unwrap().def, "Chair");
    }

    #[test]
    fn flood_unfog_stops_at_walls() {
        let mut m = open_map(6, 3);
        // Full-height wall at x = 2 splits the map.
        for z in 0..3 {
            m.set_walkable(Cell::flat(2, z), false).unwrap();
        }
        m.fog_all();
        let revealed = m.flood_unfog(Cell::flat(0, 0));
        // Left region (2 × 3) plus the wall column (1 × 3).
        assert_eq!(revealed, 9);
        assert!(!m.is_fogged(Cell::flat(1, 2)));
        assert!(!m.is_fogged(Cell::flat(2, 1)));
        assert!(m.is_fogged(Cell::flat(3, 1)));
    }

    #[test]
    fn flood_unfog_on_clear_cell_is_noop() {
        let mut m = open_map(3, 3);
        assert_eq!(m.flood_unfog(Cell::flat(1, 1)), 0);
    }
}

// ── Ring enumeration ──────────────────────────────────────────────────────────

#[cfg(test)]
mod radial_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{cells_within, ring_cells};

    #[test]
    fn ring_zero_is_center() {
        assert_eq!(ring_cells(Cell::flat(3, 3), 0), vec![Cell::flat(3, 3)]);
    }

    #[test]
    fn ring_one_orthogonals_first() {
        let ring = ring_cells(Cell::flat(0, 0), 1);
        assert_eq!(ring.len(), 8);
        assert_eq!(&ring[..4], &[Cell::flat(0, -1), Cell::flat(-1, 0), Cell::flat(1, 0), Cell::flat(0, 1)]);
    }

    #[test]
    fn widest_ring_is_perimeter_only() {
        let center = Cell::flat(100, -100);
        let ring = ring_cells(center, 32);
        assert_eq!(ring.len(), 256);
        assert!(ring.iter().all(|c| c.chebyshev(center) == 32));
        assert_eq!(ring[0], Cell::flat(100, -132));
        assert_eq!(ring[ring.len() - 1], Cell::flat(132, -68));
    }

    #[test]
    fn cells_within_counts() {
        assert_eq!(cells_within(Cell::flat(0, 0), 2).count(), 25);
    }

    proptest! {
        #[test]
        fn ring_is_complete_and_exact(x in -50i32..50, z in -50i32..50, r in 0u32..8) {
            let center = Cell::flat(x, z);
            let ring = ring_cells(center, r);
            let expected = if r == 0 { 1 } else { 8 * r as usize };
            prop_assert_eq!(ring.len(), expected);
            for c in &ring {
                prop_assert_eq!(c.chebyshev(center), r);
            }
            let mut dedup = ring.clone();
            dedup.sort();
            dedup.dedup();
            prop_assert_eq!(dedup.len(), ring.len());
        }

        #[test]
        fn ring_order_is_nearest_first(r in 1u32..8) {
            let center = Cell::flat(0, 0);
            let ring = ring_cells(center, r);
            for pair in ring.windows(2) {
                prop_assert!(pair[0].distance_squared(center) <= pair[1].distance_squared(center));
            }
        }
    }
}

// ── Oracles ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod oracle_tests {
    use super::*;
    use crate::{ChebyshevOracle, FixedCostOracle, PathCost, PathCostOracle, WorldError, WorldResult};

    #[test]
    fn chebyshev_cost() {
        let m = open_map(40, 40);
        let o = ChebyshevOracle { cost_per_cell: 10 };
        let c = o.path_cost(&m, Cell::flat(0, 0), Cell::flat(30, 12), AgentId(0)).unwrap();
        assert_eq!(c, PathCost::Cost(300));
    }

    #[test]
    fn chebyshev_unreachable_when_blocked() {
        let mut m = open_map(10, 10);
        m.set_walkable(Cell::flat(5, 5), false).unwrap();
        let o = ChebyshevOracle::default();
        assert_eq!(o.path_cost(&m, Cell::flat(0, 0), Cell::flat(5, 5), AgentId(0)).unwrap(), PathCost::Unreachable);
        assert_eq!(o.path_cost(&m, Cell::flat(0, 0), Cell::flat(50, 5), AgentId(0)).unwrap(), PathCost::Unreachable);
    }

    #[test]
    fn fixed_and_closure_oracles() {
        let m = open_map(4, 4);
        let fixed = FixedCostOracle(PathCost::Cost(450));
        assert_eq!(fixed.path_cost(&m, Cell::flat(0, 0), Cell::flat(1, 1), AgentId(0)).unwrap(), PathCost::Cost(450));

        let faulty = |_: Cell, _: Cell| -> WorldResult<PathCost> { Err(WorldError::OracleFault("boom".into())) };
        assert!(faulty.path_cost(&m, Cell::flat(0, 0), Cell::flat(1, 1), AgentId(0)).is_err());
    }
}
