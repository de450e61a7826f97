//! Atomic creation of a linked entry/exit pair.

use sg_core::{AgentId, Cell, PortalId, Target};
use sg_world::Thing;
use tracing::{debug, info};

use crate::{
    Effect, Portal, PortalContext, PortalError, PortalResult, PortalState, PortalStore,
    is_valid_portal_location,
};

/// Ids of a freshly spawned pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PortalPair {
    pub entry: PortalId,
    pub exit:  PortalId,
}

impl PortalStore {
    /// Validate both cells, then create, link, and place an entry/exit pair
    /// owned by `owner`.
    ///
    /// `entry` is validated with `owner` exempt (it is standing there);
    /// `exit` with no exemption.  On rejection nothing is created.  Both
    /// portals are linked before either is placed, and both are placed
    /// before any effect is played.
    pub fn try_spawn_pair(
        &mut self,
        ctx:         &mut PortalContext<'_>,
        owner:       AgentId,
        entry:       Cell,
        exit:        Cell,
        destination: Target,
    ) -> PortalResult<PortalPair> {
        if !is_valid_portal_location(entry, &*ctx.map, Some(owner))
            || !is_valid_portal_location(exit, &*ctx.map, None)
        {
            debug!(agent = %owner, %entry, %exit, "portal placement rejected");
            return Err(PortalError::PlacementRejected { entry, exit });
        }

        let pair = PortalPair { entry: self.allocate_id(), exit: self.allocate_id() };
        let now = ctx.now();
        let make = |id, position, linked, is_entry| Portal {
            id,
            position,
            linked: Some(linked),
            owner: Some(owner),
            spawn_tick: now,
            is_entry,
            original_destination: destination,
            state: PortalState::Active,
            entry_cued: false,
        };
        let entry_portal = make(pair.entry, entry, pair.exit, true);
        let exit_portal = make(pair.exit, exit, pair.entry, false);

        ctx.map.spawn_thing(Thing::Portal(pair.entry), entry)?;
        if let Err(e) = ctx.map.spawn_thing(Thing::Portal(pair.exit), exit) {
            ctx.map.despawn_thing(Thing::Portal(pair.entry));
            return Err(e.into());
        }
        self.portals.insert(pair.entry, entry_portal);
        self.portals.insert(pair.exit, exit_portal);

        ctx.cue(Effect::PlacementRing { cell: entry });
        ctx.cue(Effect::PlacementRing { cell: exit });

        info!(agent = %owner, %entry, %exit, %destination, "portal pair spawned");
        Ok(pair)
    }
}
