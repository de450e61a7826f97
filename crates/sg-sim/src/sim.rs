//! The `Sim` struct and its tick loop.

use std::io::{Read, Write};

use sg_agent::{AgentStore, Job, JobCondition, JobKind};
use sg_core::{AgentId, Cell, PortalConfig, PortalId, SimConfig, SimRng, Tick, TickClock};
use sg_portal::{EffectSink, PortalContext, PortalOutcome, PortalPair, PortalStore, SaveFile};
use sg_world::{GridMap, PathCostOracle, Thing, WorldMap};
use tracing::{debug, info};

use crate::{Interception, MovementInterceptor, SimObserver, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<O, E>` owns the map, the agents, and the live portals, and drives
/// the four-phase tick described in the crate docs.  `O` answers path-cost
/// queries; `E` receives cues and teleport notifications.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<O: PathCostOracle, E: EffectSink> {
    pub config: SimConfig,

    /// Read every tick; the host may change it between ticks.
    pub portal_config: PortalConfig,

    pub clock: TickClock,

    pub map: GridMap,

    pub agents: AgentStore,

    pub portals: PortalStore,

    pub interceptor: MovementInterceptor<O>,

    pub effects: E,

    /// Landing tie-breaks.
    pub rng: SimRng,
}

impl<O: PathCostOracle, E: EffectSink> Sim<O, E> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick to `config.total_ticks`.
    pub fn run<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<()> {
        let end = Tick(self.config.total_ticks);
        while self.clock.current_tick < end {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(tick = %self.clock.current_tick, "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `total_ticks`).
    pub fn run_ticks<Obs: SimObserver>(&mut self, n: u64, observer: &mut Obs) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Give `agent` a walk to `destination`, replacing its current job.
    ///
    /// The request reaches the interceptor in the next path-request phase.
    pub fn order_goto(&mut self, agent: AgentId, destination: Cell) -> SimResult<()> {
        self.agents
            .try_get_mut(agent)?
            .start_job(Job::goto(destination), JobCondition::InterruptForced);
        Ok(())
    }

    /// Route a movement request through the interceptor.
    ///
    /// On pass-through the agent starts walking to `destination`; when
    /// handled it stays put on its new entry portal.
    pub fn request_move(&mut self, agent: AgentId, destination: Cell) -> SimResult<Interception> {
        let (portals, interceptor, mut ctx) = self.split();
        let decision = interceptor.intercept(portals, &mut ctx, agent, destination);
        if !decision.is_handled() {
            self.agents.try_get_mut(agent)?.pather.start(destination);
        }
        Ok(decision)
    }

    /// Open a pair from `agent` to ten cells east, ignoring cost and device.
    pub fn force_create_portal(&mut self, agent: AgentId) -> SimResult<PortalPair> {
        let (portals, _, mut ctx) = self.split();
        Ok(portals.force_create_portal(&mut ctx, agent)?)
    }

    /// Remove every portal.  Returns how many were removed.
    pub fn clear_all_portals(&mut self) -> usize {
        self.portals.clear_all_portals(&mut self.map)
    }

    /// Status summary for one portal, or `None` if it no longer exists.
    pub fn inspect_portal(&self, id: PortalId) -> Option<String> {
        self.portals
            .get(id)
            .map(|p| p.inspect(&self.portals, &self.agents, &self.clock, &self.portal_config))
    }

    /// Write every live portal as JSON.
    pub fn save_portals<W: Write>(&self, writer: W) -> SimResult<()> {
        self.portals.save_json(writer)?;
        Ok(())
    }

    /// Replace the live portals with those in a JSON save.  Returns how many
    /// were restored.
    ///
    /// The save is parsed before anything is cleared; an unreadable save or
    /// a failed restore leaves the live portals in place.
    pub fn restore_portals<R: Read>(&mut self, reader: R) -> SimResult<usize> {
        let save = SaveFile::read_json(reader)?;
        let previous = self.portals.to_save_file();
        self.clear_all_portals();
        match PortalStore::restore(save.portals, save.next_id, &mut self.map, &self.agents) {
            Ok(store) => {
                self.portals = store;
                Ok(self.portals.len())
            }
            Err(e) => {
                self.portals = PortalStore::restore(previous.portals, previous.next_id, &mut self.map, &self.agents)?;
                Err(e.into())
            }
        }
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<Obs: SimObserver>(&mut self, observer: &mut Obs) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        self.process_tick(now, observer)?;
        observer.on_tick_end(now, &self.agents, &self.portals);
        self.clock.advance();
        Ok(())
    }

    fn process_tick<Obs: SimObserver>(&mut self, now: Tick, observer: &mut Obs) -> SimResult<()> {
        // ── Phase 1: portals ──────────────────────────────────────────────
        let outcomes = {
            let (portals, _, mut ctx) = self.split();
            portals.tick_all(&mut ctx)
        };
        for outcome in &outcomes {
            if let PortalOutcome::Expired { owner: Some(owner), .. } = outcome {
                self.repath_if_stranded(*owner);
            }
            observer.on_portal_outcome(now, outcome);
        }

        // ── Phase 2: path requests ────────────────────────────────────────
        let requests: Vec<(AgentId, Cell)> = self
            .agents
            .iter()
            .filter(|(_, a)| a.pather.needs_path && a.spawned && a.is_capable())
            .filter_map(|(id, a)| {
                let job = a.job.as_ref()?;
                let dest = job.target.cell()?;
                (job.kind == JobKind::Goto).then_some((id, dest))
            })
            .collect();
        for (agent, dest) in requests {
            self.agents.try_get_mut(agent)?.pather.needs_path = false;
            let decision = self.request_move(agent, dest)?;
            observer.on_interception(now, agent, dest, &decision);
        }

        // ── Phase 3: walk ─────────────────────────────────────────────────
        let walkers: Vec<AgentId> = self
            .agents
            .iter()
            .filter(|(_, a)| a.pather.moving && a.spawned && a.is_capable() && !a.is_stunned() && !a.teleporting)
            .map(|(id, _)| id)
            .collect();
        for agent in walkers {
            self.walk_one(agent)?;
        }

        // ── Phase 4: stun decay ───────────────────────────────────────────
        let ids: Vec<AgentId> = self.agents.ids().collect();
        for agent in ids {
            self.agents.try_get_mut(agent)?.tick_stun();
        }

        Ok(())
    }

    /// One step toward the pather destination.  Blocked walkers stop.
    fn walk_one(&mut self, id: AgentId) -> SimResult<()> {
        let agent = self.agents.try_get_mut(id)?;
        let Some(dest) = agent.pather.destination else {
            agent.pather.stop();
            return Ok(());
        };
        let next = agent.position.step_toward(dest);
        let blocked = !self.map.walkable(next)
            || self.map.things_at(next).iter().any(|&t| self.map.is_impassable(t));
        if blocked {
            debug!(agent = %agent.name, from = %agent.position, %next, "walk blocked");
            agent.pather.stop();
            return Ok(());
        }

        self.map.move_thing(Thing::Agent(id), next)?;
        agent.position = next;
        if next == dest {
            agent.pather.stop();
            if agent.job.as_ref().is_some_and(|j| j.target.cell() == Some(dest)) {
                debug!(agent = %agent.name, %dest, "arrived");
                agent.end_job();
            }
        }
        Ok(())
    }

    /// After its pair expires unused, an owner still holding an unfinished
    /// walk asks for a route again.
    fn repath_if_stranded(&mut self, owner: AgentId) {
        let Some(agent) = self.agents.get_mut(owner) else {
            return;
        };
        let wants_walk = agent.job.as_ref().is_some_and(|j| j.wants_travel());
        if wants_walk && !agent.pather.moving {
            debug!(agent = %agent.name, "portal expired unused; re-pathing");
            agent.pather.needs_path = true;
        }
    }

    /// Split-borrow the portal store, the interceptor, and a context over
    /// the remaining world state.
    fn split(&mut self) -> (&mut PortalStore, &MovementInterceptor<O>, PortalContext<'_>) {
        let ctx = PortalContext {
            map:     &mut self.map,
            agents:  &mut self.agents,
            config:  &self.portal_config,
            clock:   self.clock,
            rng:     &mut self.rng,
            effects: &mut self.effects,
        };
        (&mut self.portals, &self.interceptor, ctx)
    }
}
