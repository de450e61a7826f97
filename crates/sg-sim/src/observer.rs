//! Simulation observer trait for progress reporting and data collection.

use sg_agent::AgentStore;
use sg_core::{AgentId, Cell, Tick};
use sg_portal::{PortalOutcome, PortalStore};

use crate::Interception;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every movement request routed through the interceptor.
    fn on_interception(&mut self, _tick: Tick, _agent: AgentId, _destination: Cell, _decision: &Interception) {}

    /// Called for every portal that expired, teleported, or was blocked.
    fn on_portal_outcome(&mut self, _tick: Tick, _outcome: &PortalOutcome) {}

    /// Called at the end of each tick with read-only world state.
    fn on_tick_end(&mut self, _tick: Tick, _agents: &AgentStore, _portals: &PortalStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
