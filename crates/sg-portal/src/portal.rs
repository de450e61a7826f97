//! The portal entity.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use sg_agent::AgentStore;
use sg_core::{AgentId, Cell, PortalConfig, PortalId, Target, Tick, TickClock};

use crate::PortalStore;

/// Where a portal sits in its lifecycle.
///
/// `Active` is the only state a portal rests in between ticks.  The other
/// states are passed through inside a single tick on the way to teardown;
/// [`PortalStore::state_of`] reports `Consumed` once a portal is gone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortalState {
    #[default]
    Active,
    Triggered,
    Expired,
    Consumed,
}

/// One half of a portal pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Portal {
    pub id:       PortalId,
    pub position: Cell,
    /// The other half.  `None` once the pair is being torn down, or after a
    /// restore that could not re-establish a mutual link.
    pub linked:   Option<PortalId>,
    /// The agent that opened the pair.  Only this agent can trigger it.
    pub owner:    Option<AgentId>,
    pub spawn_tick: Tick,
    /// Entry halves trigger; exit halves are passive markers.
    pub is_entry: bool,
    /// Where the owner was headed before the portals took over.
    pub original_destination: Target,
    pub state:    PortalState,
    /// Entry cues have played for this pair.  A teleport deferred for want
    /// of a landing cell retries without replaying them.
    pub entry_cued: bool,
}

impl Portal {
    /// Ticks left before this portal expires.  Zero or negative means the
    /// deadline has been reached.
    pub fn ticks_until_despawn(&self, now: Tick, duration_ticks: u64) -> i64 {
        self.spawn_tick.offset(duration_ticks).signed_diff(now)
    }

    #[inline]
    pub fn is_expired(&self, now: Tick, duration_ticks: u64) -> bool {
        self.ticks_until_despawn(now, duration_ticks) <= 0
    }

    pub fn role(&self) -> &'static str {
        if self.is_entry { "Entry" } else { "Exit" }
    }

    /// Multi-line status summary for inspection panes and logs.
    pub fn inspect(
        &self,
        portals: &PortalStore,
        agents:  &AgentStore,
        clock:   &TickClock,
        config:  &PortalConfig,
    ) -> String {
        let remaining = self.ticks_until_despawn(clock.current_tick, config.duration_ticks(clock));
        let mut out = String::new();
        let _ = write!(out, "Portal type: {}", self.role());
        let _ = write!(out, "\nTime remaining: {:.1}s", clock.secs_for_ticks(remaining.max(0)));
        if let Some(twin) = self.linked.and_then(|id| portals.get(id)) {
            let _ = write!(out, "\nLinked to: {}", twin.position);
        }
        if let Some(owner) = self.owner.and_then(|id| agents.get(id)) {
            let _ = write!(out, "\nOwner: {}", owner.name);
        }
        out
    }
}
