//! Live portal storage and pair teardown.

use std::collections::BTreeMap;

use sg_core::PortalId;
use sg_world::{GridMap, Thing};
use tracing::debug;

use crate::{Portal, PortalError, PortalResult, PortalState};

/// Every portal currently in the world, keyed by id.
///
/// Ids come from a monotonic counter and are never reused, so a stale id
/// held by a torn-down twin can never alias a newer portal.  Iteration is
/// in ascending id order, which is the order portals tick in.
#[derive(Default, Debug)]
pub struct PortalStore {
    pub(crate) portals: BTreeMap<PortalId, Portal>,
    pub(crate) next_id: u32,
}

impl PortalStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.portals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    #[inline]
    pub fn get(&self, id: PortalId) -> Option<&Portal> {
        self.portals.get(&id)
    }

    pub fn try_get(&self, id: PortalId) -> PortalResult<&Portal> {
        self.portals.get(&id).ok_or(PortalError::NotFound(id))
    }

    #[inline]
    pub fn contains(&self, id: PortalId) -> bool {
        self.portals.contains_key(&id)
    }

    /// Ids in ascending order.
    pub fn ids(&self) -> Vec<PortalId> {
        self.portals.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Portal> + '_ {
        self.portals.values()
    }

    /// `Consumed` for ids no longer in the store.
    pub fn state_of(&self, id: PortalId) -> PortalState {
        self.portals.get(&id).map_or(PortalState::Consumed, |p| p.state)
    }

    pub(crate) fn allocate_id(&mut self) -> PortalId {
        let id = PortalId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn set_state(&mut self, id: PortalId, state: PortalState) {
        if let Some(p) = self.portals.get_mut(&id) {
            p.state = state;
        }
    }

    // ── Teardown ──────────────────────────────────────────────────────────

    /// Destroy `id` and its twin.
    ///
    /// Both links are cleared before either half leaves the map.  Unknown
    /// or already-destroyed ids are a no-op.  Returns the number of portals
    /// removed (0, 1, or 2).
    pub fn destroy_pair(&mut self, id: PortalId, map: &mut GridMap) -> usize {
        let Some(portal) = self.portals.get_mut(&id) else {
            return 0;
        };
        let twin = portal.linked.take();

        let mut removed = 0;
        if let Some(twin_id) = twin {
            if let Some(t) = self.portals.get_mut(&twin_id) {
                t.linked = None;
            }
            removed += self.remove_one(twin_id, map);
        }
        removed += self.remove_one(id, map);
        debug!(portal = %id, removed, "portal pair destroyed");
        removed
    }

    fn remove_one(&mut self, id: PortalId, map: &mut GridMap) -> usize {
        match self.portals.remove(&id) {
            Some(_) => {
                map.despawn_thing(Thing::Portal(id));
                1
            }
            None => 0,
        }
    }
}
