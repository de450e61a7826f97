//! Borrowed world state handed to spawner, lifecycle, and teleport calls.

use sg_agent::AgentStore;
use sg_core::{PortalConfig, SimRng, Tick, TickClock};
use sg_world::GridMap;
use tracing::warn;

use crate::{Effect, EffectSink, TeleportEvent};

/// Everything a portal operation may read or mutate, borrowed for one call.
///
/// Built by the sim from disjoint fields, so holding one never conflicts
/// with the `PortalStore` being mutated alongside it.
pub struct PortalContext<'a> {
    pub map:     &'a mut GridMap,
    pub agents:  &'a mut AgentStore,
    pub config:  &'a PortalConfig,
    pub clock:   TickClock,
    pub rng:     &'a mut SimRng,
    pub effects: &'a mut dyn EffectSink,
}

impl PortalContext<'_> {
    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    /// Play `effect` if visualization is on.  Failures are logged only.
    pub(crate) fn cue(&mut self, effect: Effect) {
        if !self.config.enable_visualization {
            return;
        }
        if let Err(e) = self.effects.play(&effect) {
            warn!(?effect, error = %e, "effect playback failed");
        }
    }

    /// Broadcast a teleport.  Failures are logged only.
    pub(crate) fn broadcast(&mut self, event: &TeleportEvent) {
        if let Err(e) = self.effects.teleported(event) {
            warn!(agent = %event.agent, error = %e, "teleport notification failed");
        }
    }
}
