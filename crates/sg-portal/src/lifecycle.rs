//! Per-tick portal behaviour: expiry first, then trigger detection.

use sg_agent::AgentStore;
use sg_core::{AgentId, Cell, PortalId};
use sg_world::{GridMap, WorldMap};
use tracing::{debug, warn};

use crate::{PortalContext, PortalError, PortalState, PortalStore, TeleportEvent};

/// What happened to one portal during a tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortalOutcome {
    /// Nothing to do; still active.
    Idle,
    /// The deadline passed and the pair was torn down unused.
    Expired { portal: PortalId, owner: Option<AgentId> },
    /// The owner went through and the pair was consumed.
    Teleported(TeleportEvent),
    /// The owner was on the entry but no landing cell was free.  The pair
    /// is untouched and will retry next tick.
    Blocked { portal: PortalId, agent: AgentId },
}

impl PortalStore {
    /// Tick every live portal in ascending id order.
    ///
    /// A portal torn down earlier in the same pass (as the twin of one that
    /// expired or triggered) is skipped.  Only non-`Idle` outcomes are
    /// returned.
    pub fn tick_all(&mut self, ctx: &mut PortalContext<'_>) -> Vec<PortalOutcome> {
        let mut outcomes = Vec::new();
        for id in self.ids() {
            if !self.contains(id) {
                continue;
            }
            match self.tick_portal(id, ctx) {
                PortalOutcome::Idle => {}
                outcome => outcomes.push(outcome),
            }
        }
        outcomes
    }

    /// One tick of portal `id`.
    pub fn tick_portal(&mut self, id: PortalId, ctx: &mut PortalContext<'_>) -> PortalOutcome {
        let Some(portal) = self.get(id) else {
            return PortalOutcome::Idle;
        };

        let duration = ctx.config.duration_ticks(&ctx.clock);
        if portal.is_expired(ctx.now(), duration) {
            let owner = portal.owner;
            self.set_state(id, PortalState::Expired);
            self.destroy_pair(id, ctx.map);
            debug!(portal = %id, "portal expired");
            return PortalOutcome::Expired { portal: id, owner };
        }

        if !portal.is_entry {
            return PortalOutcome::Idle;
        }
        // Dangling or torn-down link: nothing to trigger into.
        if !portal.linked.is_some_and(|t| self.contains(t)) {
            return PortalOutcome::Idle;
        }
        let Some(agent) = self.find_trigger(id, ctx) else {
            return PortalOutcome::Idle;
        };

        match self.teleport(id, agent, ctx) {
            Ok(event) => PortalOutcome::Teleported(event),
            Err(PortalError::NoLandingCell(cell)) => {
                warn!(portal = %id, agent = %agent, near = %cell, "no landing cell; teleport deferred");
                PortalOutcome::Blocked { portal: id, agent }
            }
            Err(e) => {
                warn!(portal = %id, agent = %agent, error = %e, "teleport aborted");
                PortalOutcome::Blocked { portal: id, agent }
            }
        }
    }

    /// Scan the entry cell and its eight neighbours for the owner, standing
    /// on the portal or walking onto it.
    fn find_trigger(&self, id: PortalId, ctx: &PortalContext<'_>) -> Option<AgentId> {
        let portal = self.get(id)?;
        let owner = portal.owner?;
        let cell = portal.position;
        let map: &GridMap = &*ctx.map;
        let agents: &AgentStore = &*ctx.agents;

        scan_cells(cell)
            .filter(|&c| map.in_bounds(c))
            .flat_map(|c| map.agents_at(c))
            .find(|&a| {
                a == owner
                    && agents.get(a).is_some_and(|agent| {
                        agent.is_capable()
                            && !agent.teleporting
                            && (agent.position == cell || agent.pather.is_heading_to(cell))
                    })
            })
    }
}

fn scan_cells(center: Cell) -> impl Iterator<Item = Cell> {
    center.adjacent_8().chain(std::iter::once(center))
}
