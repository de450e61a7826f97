//! Integration tests for sg-sim.

use sg_agent::{Agent, AgentBuilder};
use sg_core::{AgentId, Cell, SkipgateConfig, Tick};
use sg_portal::{NoopEffects, PortalOutcome, RecordingSink};
use sg_world::{ChebyshevOracle, FixedCostOracle, GridMap, PathCost, PathCostOracle};

use crate::{Interception, NoopObserver, PassReason, Sim, SimBuilder, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

const DEVICE: &str = "PortalGun_Device";

fn ada_at(cell: Cell) -> Agent {
    AgentBuilder::colonist("Ada", cell).wearing(DEVICE).build()
}

fn sim_with<O: PathCostOracle>(oracle: O, agent: Agent) -> Sim<O, RecordingSink> {
    SimBuilder::new(SkipgateConfig::default(), GridMap::new(64, 64).unwrap(), oracle, RecordingSink::default())
        .agent(agent)
        .build()
        .unwrap()
}

fn fixed(cost: u32) -> FixedCostOracle {
    FixedCostOracle(PathCost::Cost(cost))
}

const ADA: AgentId = AgentId(0);

/// Collects everything the sim reports.
#[derive(Default)]
struct Recorder {
    outcomes:      Vec<(Tick, PortalOutcome)>,
    interceptions: Vec<(Tick, Interception)>,
    ticks:         u64,
    ended:         bool,
}

impl SimObserver for Recorder {
    fn on_interception(&mut self, tick: Tick, _agent: AgentId, _dest: Cell, decision: &Interception) {
        self.interceptions.push((tick, *decision));
    }

    fn on_portal_outcome(&mut self, tick: Tick, outcome: &PortalOutcome) {
        self.outcomes.push((tick, outcome.clone()));
    }

    fn on_tick_end(&mut self, _tick: Tick, _agents: &sg_agent::AgentStore, _portals: &sg_portal::PortalStore) {
        self.ticks += 1;
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        self.ended = true;
    }
}

// ── SimBuilder ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::SimError;

    #[test]
    fn agents_are_placed_on_the_map() {
        let sim = sim_with(fixed(0), ada_at(Cell::flat(3, 4)));
        let a = sim.agents.get(ADA).unwrap();
        assert!(a.spawned);
        assert_eq!(sim.map.agents_at(Cell::flat(3, 4)).collect::<Vec<_>>(), [ADA]);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let mut config = SkipgateConfig::default();
        config.portal.min_path_cost_threshold = 50;
        let res = SimBuilder::new(config, GridMap::new(8, 8).unwrap(), fixed(0), NoopEffects).build();
        assert!(matches!(res, Err(SimError::Config(_))));
    }

    #[test]
    fn off_map_agent_rejected() {
        let res = SimBuilder::new(SkipgateConfig::default(), GridMap::new(8, 8).unwrap(), fixed(0), NoopEffects)
            .agent(ada_at(Cell::flat(20, 20)))
            .build();
        assert!(matches!(res, Err(SimError::World(_))));
    }
}

// ── Movement interceptor ──────────────────────────────────────────────────────

#[cfg(test)]
mod interceptor_tests {
    use super::*;
    use proptest::prelude::*;
    use sg_world::{WorldError, WorldResult};

    #[test]
    fn expensive_walk_is_handled() {
        let mut sim = sim_with(fixed(450), ada_at(Cell::flat(0, 0)));
        let dest = Cell::flat(30, 30);
        let decision = sim.request_move(ADA, dest).unwrap();

        let Interception::Handled { pair, cost } = decision else {
            panic!("expected handled, got {decision:?}");
        };
        assert_eq!(cost, 450);
        assert_eq!(sim.portals.get(pair.entry).unwrap().position, Cell::flat(0, 0));
        assert_eq!(sim.portals.get(pair.exit).unwrap().position, dest);
        assert_eq!(sim.portals.get(pair.entry).unwrap().original_destination, dest.into());

        // The agent stays put and is not told to walk.
        let a = sim.agents.get(ADA).unwrap();
        assert_eq!(a.position, Cell::flat(0, 0));
        assert!(!a.pather.moving);
        assert!(a.job.is_none());
    }

    #[test]
    fn cheap_walk_passes_through() {
        let mut sim = sim_with(fixed(150), ada_at(Cell::flat(0, 0)));
        let decision = sim.request_move(ADA, Cell::flat(30, 30)).unwrap();
        assert_eq!(decision, Interception::PassThrough(PassReason::WithinThreshold { cost: 150 }));
        assert!(sim.portals.is_empty());
        assert!(sim.agents.get(ADA).unwrap().pather.is_heading_to(Cell::flat(30, 30)));
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut sim = sim_with(fixed(300), ada_at(Cell::flat(0, 0)));
        assert!(!sim.request_move(ADA, Cell::flat(30, 30)).unwrap().is_handled());
    }

    #[test]
    fn unreachable_priced_by_distance() {
        let sim = sim_with(FixedCostOracle(PathCost::Unreachable), ada_at(Cell::flat(0, 0)));
        let cost = |to| sim.interceptor.path_cost(&sim.map, Cell::flat(0, 0), to, ADA, &sim.portal_config);
        assert_eq!(cost(Cell::flat(10, 0)), 200);
        assert_eq!(cost(Cell::flat(20, 0)), 400);
    }

    #[test]
    fn faulting_oracle_priced_by_distance() {
        let oracle = |_: Cell, _: Cell| -> WorldResult<PathCost> { Err(WorldError::OracleFault("down".into())) };
        let mut sim = sim_with(oracle, ada_at(Cell::flat(0, 0)));
        let decision = sim.request_move(ADA, Cell::flat(30, 0)).unwrap();
        assert!(matches!(decision, Interception::Handled { cost: 450, .. }));
    }

    #[test]
    fn device_required_unless_disabled() {
        let plain = AgentBuilder::colonist("Bo", Cell::flat(0, 0)).build();
        let mut sim = sim_with(fixed(900), plain);
        assert_eq!(
            sim.request_move(ADA, Cell::flat(30, 30)).unwrap(),
            Interception::PassThrough(PassReason::NoDevice)
        );
        sim.portal_config.require_device = false;
        assert!(sim.request_move(ADA, Cell::flat(30, 30)).unwrap().is_handled());
    }

    #[test]
    fn carried_device_counts() {
        let carrier = AgentBuilder::colonist("Bo", Cell::flat(0, 0)).carrying(DEVICE).build();
        let mut sim = sim_with(fixed(900), carrier);
        assert!(sim.request_move(ADA, Cell::flat(30, 30)).unwrap().is_handled());
    }

    #[test]
    fn disqualified_agents_pass_through() {
        let cases: [(fn(&mut Agent), PassReason); 4] = [
            (|a| a.dead = true, PassReason::Dead),
            (|a| a.downed = true, PassReason::Downed),
            (|a| a.teleporting = true, PassReason::Teleporting),
            (
                |a| {
                    a.faction = sg_agent::Faction::Neutral;
                    a.player_controlled = false;
                },
                PassReason::NotPlayerAffiliated,
            ),
        ];
        for (tweak, reason) in cases {
            let mut sim = sim_with(fixed(900), ada_at(Cell::flat(0, 0)));
            tweak(sim.agents.get_mut(ADA).unwrap());
            let decision = sim
                .interceptor
                .evaluate(ADA, Cell::flat(30, 30), &sim.map, &sim.agents, &sim.portal_config);
            assert_eq!(decision, Err(reason));
            assert!(sim.portals.is_empty());
        }
    }

    #[test]
    fn unknown_and_unspawned_agents_pass_through() {
        let mut sim = sim_with(fixed(900), ada_at(Cell::flat(0, 0)));
        let missing = sim.interceptor.evaluate(AgentId(9), Cell::flat(30, 30), &sim.map, &sim.agents, &sim.portal_config);
        assert_eq!(missing, Err(PassReason::AgentMissing));

        sim.agents.get_mut(ADA).unwrap().spawned = false;
        let unspawned = sim.interceptor.evaluate(ADA, Cell::flat(30, 30), &sim.map, &sim.agents, &sim.portal_config);
        assert_eq!(unspawned, Err(PassReason::NotSpawned));
    }

    #[test]
    fn unplaceable_exit_falls_back_to_walking() {
        let mut sim = sim_with(fixed(900), ada_at(Cell::flat(0, 0)));
        let decision = sim.request_move(ADA, Cell::flat(500, 500)).unwrap();
        assert_eq!(decision, Interception::PassThrough(PassReason::PlacementFailed));
        assert!(sim.portals.is_empty());
        assert!(sim.agents.get(ADA).unwrap().pather.moving);
    }

    #[test]
    fn blocked_destination_shifts_exit() {
        let mut sim = sim_with(fixed(900), ada_at(Cell::flat(0, 0)));
        sim.map.add_structure("Wall", true, Cell::flat(30, 30)).unwrap();
        let Interception::Handled { pair, .. } = sim.request_move(ADA, Cell::flat(30, 30)).unwrap() else {
            panic!("expected handled");
        };
        assert_eq!(sim.portals.get(pair.exit).unwrap().position, Cell::flat(30, 29));
    }

    proptest! {
        #[test]
        fn never_spawns_at_or_below_threshold(threshold in 100u32..=1000, frac in 0.0f64..=1.0) {
            let cost = (threshold as f64 * frac) as u32;
            let mut sim = sim_with(fixed(cost), ada_at(Cell::flat(0, 0)));
            sim.portal_config.min_path_cost_threshold = threshold;
            let decision = sim.request_move(ADA, Cell::flat(40, 40)).unwrap();
            prop_assert!(!decision.is_handled());
            prop_assert!(sim.portals.is_empty());
        }
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sim_tests {
    use super::*;
    use sg_agent::JobKind;
    use sg_world::Thing;

    #[test]
    fn long_walk_goes_through_portals() {
        let mut sim = sim_with(ChebyshevOracle::default(), ada_at(Cell::flat(2, 2)));
        let dest = Cell::flat(50, 2);
        sim.order_goto(ADA, dest).unwrap();

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(matches!(rec.interceptions[..], [(Tick(0), Interception::Handled { cost: 480, .. })]));
        assert_eq!(sim.portals.len(), 2);

        sim.run_ticks(1, &mut rec).unwrap();
        assert!(matches!(rec.outcomes[..], [(Tick(1), PortalOutcome::Teleported(_))]));
        assert!(sim.portals.is_empty());
        let a = sim.agents.get(ADA).unwrap();
        assert_eq!(a.position, dest);
        assert_eq!(a.job.as_ref().map(|j| j.kind), Some(JobKind::Goto));
        assert_eq!(sim.effects.teleports.len(), 1);

        // The resumed walk is cheap; it completes once the stun wears off.
        sim.run_ticks(61, &mut rec).unwrap();
        let a = sim.agents.get(ADA).unwrap();
        assert!(!a.is_stunned());
        assert!(a.job.is_none());
        assert_eq!(rec.interceptions.len(), 2);
        assert!(matches!(rec.interceptions[1].1, Interception::PassThrough(PassReason::WithinThreshold { cost: 0 })));
    }

    #[test]
    fn short_walk_is_walked() {
        let mut sim = sim_with(ChebyshevOracle::default(), ada_at(Cell::flat(2, 2)));
        sim.order_goto(ADA, Cell::flat(10, 5)).unwrap();
        sim.run_ticks(8, &mut NoopObserver).unwrap();
        let a = sim.agents.get(ADA).unwrap();
        assert_eq!(a.position, Cell::flat(10, 5));
        assert!(a.job.is_none());
        assert!(sim.portals.is_empty());
    }

    #[test]
    fn walls_stop_walkers() {
        let mut sim = sim_with(ChebyshevOracle::default(), ada_at(Cell::flat(2, 2)));
        sim.map.add_wall(Cell::flat(5, 0), Cell::flat(5, 10)).unwrap();
        sim.order_goto(ADA, Cell::flat(8, 2)).unwrap();
        sim.run_ticks(10, &mut NoopObserver).unwrap();
        let a = sim.agents.get(ADA).unwrap();
        assert_eq!(a.position, Cell::flat(4, 2));
        assert!(!a.pather.moving);
    }

    #[test]
    fn stranded_owner_re_paths_after_expiry() {
        let mut sim = sim_with(ChebyshevOracle::default(), ada_at(Cell::flat(2, 2)));
        let dest = Cell::flat(40, 40);
        sim.order_goto(ADA, dest).unwrap();
        sim.run_ticks(1, &mut NoopObserver).unwrap();
        assert_eq!(sim.portals.len(), 2);

        // Occupy the exit and wall off everything within landing range.
        let squatter = sim.agents.push(AgentBuilder::new("Cat", dest).build());
        sim.map.spawn_thing(sg_world::Thing::Agent(squatter), dest).unwrap();
        for z in 36..=44 {
            for x in 36..=44 {
                if (x, z) != (40, 40) {
                    sim.map.set_walkable(Cell::flat(x, z), false).unwrap();
                }
            }
        }

        let mut rec = Recorder::default();
        sim.run_ticks(300, &mut rec).unwrap();
        assert!(rec.outcomes.iter().any(|(_, o)| matches!(o, PortalOutcome::Blocked { .. })));
        assert!(rec.outcomes.iter().any(|(t, o)| *t == Tick(300) && matches!(o, PortalOutcome::Expired { .. })));
        // Re-requested the same tick: a fresh pair with the exit pushed out
        // past the blocked square.
        assert_eq!(sim.portals.len(), 2);

        sim.run_ticks(1, &mut rec).unwrap();
        let a = sim.agents.get(ADA).unwrap();
        assert_eq!(a.position.chebyshev(dest), 5);
        assert!(sim.portals.is_empty());
    }

    #[test]
    fn run_stops_at_total_ticks() {
        let mut sim = sim_with(fixed(0), ada_at(Cell::flat(0, 0)));
        sim.config.total_ticks = 25;
        let mut rec = Recorder::default();
        sim.run(&mut rec).unwrap();
        assert_eq!(rec.ticks, 25);
        assert!(rec.ended);
        assert_eq!(sim.clock.current_tick, Tick(25));
    }

    #[test]
    fn save_and_restore_portals() {
        let mut sim = sim_with(fixed(900), ada_at(Cell::flat(2, 2)));
        sim.request_move(ADA, Cell::flat(40, 40)).unwrap();
        let mut buf = Vec::new();
        sim.save_portals(&mut buf).unwrap();

        assert_eq!(sim.clear_all_portals(), 2);
        assert_eq!(sim.restore_portals(buf.as_slice()).unwrap(), 2);

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(matches!(rec.outcomes[..], [(_, PortalOutcome::Teleported(_))]));
        assert_eq!(sim.agents.get(ADA).unwrap().position, Cell::flat(40, 40));
    }

    #[test]
    fn unreadable_save_keeps_live_portals() {
        let mut sim = sim_with(fixed(900), ada_at(Cell::flat(2, 2)));
        let handled = sim.request_move(ADA, Cell::flat(40, 40)).unwrap();
        let Interception::Handled { pair, .. } = handled else {
            panic!("expected a portal pair, got {handled:?}");
        };

        assert!(sim.restore_portals(&b"{not json"[..]).is_err());
        assert_eq!(sim.portals.len(), 2);
        assert_eq!(sim.portals.get(pair.entry).unwrap().linked, Some(pair.exit));
        assert_eq!(sim.map.position_of(Thing::Portal(pair.exit)), Some(Cell::flat(40, 40)));

        let mut rec = Recorder::default();
        sim.run_ticks(1, &mut rec).unwrap();
        assert!(matches!(rec.outcomes[..], [(_, PortalOutcome::Teleported(_))]));
    }

    #[test]
    fn debug_actions() {
        let mut sim = sim_with(fixed(0), ada_at(Cell::flat(2, 2)));
        let pair = sim.force_create_portal(ADA).unwrap();
        let text = sim.inspect_portal(pair.exit).unwrap();
        assert!(text.starts_with("Portal type: Exit"));
        assert!(text.contains("Linked to: (2, 0, 2)"));
        assert_eq!(sim.clear_all_portals(), 2);
        assert!(sim.inspect_portal(pair.exit).is_none());
    }
}
