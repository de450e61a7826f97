//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use sg_agent::AgentStore;
use sg_core::{AgentId, Cell, Tick};
use sg_portal::{PortalOutcome, PortalStore};
use sg_sim::{Interception, PassReason, SimObserver};

use crate::row::{InterceptionRow, PortalEventRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes interceptor decisions, portal outcomes, and
/// tick summaries to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn reason_label(reason: PassReason) -> &'static str {
    match reason {
        PassReason::AgentMissing => "agent_missing",
        PassReason::NotSpawned => "not_spawned",
        PassReason::NotPlayerAffiliated => "not_player_affiliated",
        PassReason::Dead => "dead",
        PassReason::Downed => "downed",
        PassReason::Teleporting => "teleporting",
        PassReason::NoDevice => "no_device",
        PassReason::WithinThreshold { .. } => "within_threshold",
        PassReason::PlacementFailed => "placement_failed",
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_interception(&mut self, tick: Tick, agent: AgentId, destination: Cell, decision: &Interception) {
        let (handled, cost, reason) = match *decision {
            Interception::Handled { cost, .. } => (true, Some(cost), "handled"),
            Interception::PassThrough(r @ PassReason::WithinThreshold { cost }) => (false, Some(cost), reason_label(r)),
            Interception::PassThrough(r) => (false, None, reason_label(r)),
        };
        let row = InterceptionRow {
            tick: tick.0,
            agent_id: agent.0,
            dest_x: destination.x,
            dest_z: destination.z,
            handled,
            cost,
            reason: reason.to_owned(),
        };
        let result = self.writer.write_interception(&row);
        self.store_err(result);
    }

    fn on_portal_outcome(&mut self, tick: Tick, outcome: &PortalOutcome) {
        let (portal_id, kind, agent_id) = match *outcome {
            PortalOutcome::Idle => return,
            PortalOutcome::Expired { portal, owner } => (Some(portal.0), "expired", owner.map(|a| a.0)),
            PortalOutcome::Teleported(ev) => (None, "teleported", Some(ev.agent.0)),
            PortalOutcome::Blocked { portal, agent } => (Some(portal.0), "blocked", Some(agent.0)),
        };
        let row = PortalEventRow { tick: tick.0, portal_id, kind, agent_id };
        let result = self.writer.write_portal_event(&row);
        self.store_err(result);
    }

    fn on_tick_end(&mut self, tick: Tick, agents: &AgentStore, portals: &PortalStore) {
        let row = TickSummaryRow {
            tick:           tick.0,
            live_portals:   portals.len() as u64,
            stunned_agents: agents.iter().filter(|(_, a)| a.is_stunned()).count() as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
