//! The teleport transition through an entry portal.
//!
//! Order of operations:
//!
//! 1. entry cues (skipped on a retry after a deferred landing)
//! 2. landing search (abort here leaves everything untouched)
//! 3. relocate the agent (all-or-nothing)
//! 4. exit cues
//! 5. draft a player-directed agent
//! 6. stun, attributed to the owner
//! 7. broadcast, reveal fog
//! 8. flag cargo for unloading at home
//! 9. resume the original walk
//! 10. tear down the pair
//!
//! Cue and broadcast failures are logged and skipped.

use sg_agent::{AgentKind, Job, JobCondition, Urgency};
use sg_core::{AgentId, Cell, PortalId};
use sg_world::{Thing, WorldMap};
use tracing::{debug, info};

use crate::{
    Effect, PortalContext, PortalError, PortalResult, PortalState, PortalStore, TeleportEvent,
    find_landing_cell,
};

impl PortalStore {
    /// Carry `agent` through entry portal `entry` to its linked exit.
    ///
    /// Returns [`PortalError::NoLandingCell`] without touching the agent,
    /// the map, or the pair when nothing near the exit is free.
    pub fn teleport(
        &mut self,
        entry:    PortalId,
        agent_id: AgentId,
        ctx:      &mut PortalContext<'_>,
    ) -> PortalResult<TeleportEvent> {
        let portal = self.try_get(entry)?;
        let exit_cell = portal
            .linked
            .and_then(|id| self.get(id))
            .map(|p| p.position)
            .ok_or(PortalError::Unlinked(entry))?;
        let owner = portal.owner;
        let destination = portal.original_destination;
        let already_cued = portal.entry_cued;
        let agent = ctx.agents.try_get(agent_id)?;
        if agent.teleporting {
            return Err(PortalError::AlreadyTeleporting(agent_id));
        }
        let from = agent.position;

        self.set_state(entry, PortalState::Triggered);

        // 1, once per pair
        if !already_cued {
            ctx.cue(Effect::EntryFlash { agent: agent_id, cell: from });
            ctx.cue(Effect::EntrySound { cell: from });
            if let Some(p) = self.portals.get_mut(&entry) {
                p.entry_cued = true;
            }
        }

        // 2, 3
        let landing = find_landing_cell(exit_cell, &*ctx.map, ctx.config.landing_search_radius, ctx.rng)
            .ok_or(PortalError::NoLandingCell(exit_cell))
            .and_then(|cell| relocate(ctx, agent_id, cell).map(|()| cell));
        let landing = match landing {
            Ok(cell) => cell,
            Err(e) => {
                self.set_state(entry, PortalState::Active);
                return Err(e);
            }
        };

        // 4
        ctx.cue(Effect::ExitFlash { cell: landing });
        ctx.cue(Effect::ExitSound { cell: landing });

        let reveal = {
            let stun_ticks = ctx.config.stun_ticks_after_teleport;
            let agent = ctx.agents.try_get_mut(agent_id)?;

            // 5
            if agent.drafted.is_some() && agent.is_colonist_player_controlled() && !agent.downed {
                agent.drafted = Some(true);
            }
            // 6
            if stun_ticks > 0 {
                agent.stun_for(stun_ticks, owner);
            }
            agent.is_player_aligned() && ctx.map.is_fogged(landing)
        };

        // 7
        let event = TeleportEvent { tick: ctx.now(), agent: agent_id, from, to: landing };
        ctx.broadcast(&event);
        if reveal {
            let revealed = ctx.map.flood_unfog(landing);
            debug!(%landing, revealed, "fog revealed at landing");
        }

        {
            let home = ctx.map.is_player_home();
            let agent = ctx.agents.try_get_mut(agent_id)?;

            // 8
            let hauler =
                agent.is_colonist() || agent.kind == AgentKind::PackAnimal || agent.is_colony_mech();
            if hauler && home && agent.cargo_excluding(&ctx.config.device_def).next().is_some() {
                agent.unload_everything = true;
            }
            // 9
            if let Some(dest) = destination.cell() {
                agent.start_job(Job::goto(dest).with_urgency(Urgency::Walk), JobCondition::InterruptForced);
            }
        }

        // 10
        self.destroy_pair(entry, ctx.map);

        info!(agent = %agent_id, %from, to = %landing, "agent teleported");
        Ok(event)
    }
}

/// Move the agent to `landing` with `teleporting` raised for the duration.
///
/// The map move checks the destination before touching anything, so on
/// error the agent is still where it was and the flag is cleared.
fn relocate(ctx: &mut PortalContext<'_>, agent_id: AgentId, landing: Cell) -> PortalResult<()> {
    let agent = ctx.agents.try_get_mut(agent_id)?;
    agent.teleporting = true;
    let moved = ctx.map.move_thing(Thing::Agent(agent_id), landing);
    agent.teleporting = false;
    moved?;
    agent.position = landing;
    agent.spawned = true;
    agent.pather.stop();
    Ok(())
}
