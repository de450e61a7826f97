//! The movement interceptor: should this walk be replaced by a portal pair?
//!
//! [`MovementInterceptor::evaluate`] is a pure decision over the agent,
//! the map, and the oracle.  [`MovementInterceptor::intercept`] acts on a
//! positive decision by asking the spawner for a pair; the spawner is the
//! only thing that mutates anything.

use sg_agent::AgentStore;
use sg_core::{AgentId, Cell, PortalConfig};
use sg_portal::{PortalContext, PortalPair, PortalStore, find_best_exit_position};
use sg_world::{GridMap, PathCost, PathCostOracle};
use tracing::{debug, warn};

/// Why a request was left to normal pathing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassReason {
    AgentMissing,
    NotSpawned,
    /// Neither a colonist nor player-controlled.
    NotPlayerAffiliated,
    Dead,
    Downed,
    /// A teleport for this agent is already in flight.
    Teleporting,
    NoDevice,
    WithinThreshold { cost: u32 },
    /// The spawner rejected the entry or exit cell.
    PlacementFailed,
}

/// The interceptor's answer for one movement request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Interception {
    /// A pair was placed; suppress normal pathing.
    Handled { pair: PortalPair, cost: u32 },
    PassThrough(PassReason),
}

impl Interception {
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, Interception::Handled { .. })
    }
}

/// Where a pair would go, and the cost that justified it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PortalPlan {
    pub entry: Cell,
    pub exit:  Cell,
    pub cost:  u32,
}

/// Movement interceptor backed by a path-cost oracle.
pub struct MovementInterceptor<O: PathCostOracle> {
    oracle: O,
}

impl<O: PathCostOracle> MovementInterceptor<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }

    /// Cost of walking `from → to`.
    ///
    /// Unreachable destinations and oracle faults are priced by
    /// straight-line distance so far or blocked targets still qualify.
    pub fn path_cost(&self, map: &GridMap, from: Cell, to: Cell, agent: AgentId, config: &PortalConfig) -> u32 {
        let per_cell = match self.oracle.path_cost(map, from, to, agent) {
            Ok(PathCost::Cost(c)) => return c,
            Ok(PathCost::Unreachable) => config.unreachable_cost_per_cell,
            Err(e) => {
                warn!(agent = %agent, %from, %to, error = %e, "path cost query failed; using distance");
                config.fault_cost_per_cell
            }
        };
        (from.distance_to(to) * per_cell) as u32
    }

    /// Decide without side effects.
    pub fn evaluate(
        &self,
        agent_id:    AgentId,
        destination: Cell,
        map:         &GridMap,
        agents:      &AgentStore,
        config:      &PortalConfig,
    ) -> Result<PortalPlan, PassReason> {
        let agent = agents.get(agent_id).ok_or(PassReason::AgentMissing)?;
        if !agent.spawned {
            return Err(PassReason::NotSpawned);
        }
        if !agent.is_colonist() && !agent.is_player_controlled() {
            return Err(PassReason::NotPlayerAffiliated);
        }
        if agent.dead {
            return Err(PassReason::Dead);
        }
        if agent.downed {
            return Err(PassReason::Downed);
        }
        if agent.teleporting {
            return Err(PassReason::Teleporting);
        }
        if config.require_device && !agent.has_item(&config.device_def) {
            return Err(PassReason::NoDevice);
        }

        let cost = self.path_cost(map, agent.position, destination, agent_id, config);
        debug!(
            agent = %agent.name,
            cost,
            threshold = config.min_path_cost_threshold,
            "path cost"
        );
        if cost <= config.min_path_cost_threshold {
            return Err(PassReason::WithinThreshold { cost });
        }

        let exit = find_best_exit_position(destination, map, config.exit_search_radius);
        Ok(PortalPlan { entry: agent.position, exit, cost })
    }

    /// Decide, and on a positive decision spawn the pair.
    pub fn intercept(
        &self,
        portals:     &mut PortalStore,
        ctx:         &mut PortalContext<'_>,
        agent:       AgentId,
        destination: Cell,
    ) -> Interception {
        let plan = match self.evaluate(agent, destination, &*ctx.map, &*ctx.agents, ctx.config) {
            Ok(plan) => plan,
            Err(reason) => return Interception::PassThrough(reason),
        };
        match portals.try_spawn_pair(ctx, agent, plan.entry, plan.exit, destination.into()) {
            Ok(pair) => {
                debug!(agent = %agent, entry = %plan.entry, exit = %plan.exit, "portal path created");
                Interception::Handled { pair, cost: plan.cost }
            }
            Err(e) => {
                debug!(agent = %agent, error = %e, "portal path not created");
                Interception::PassThrough(PassReason::PlacementFailed)
            }
        }
    }
}
