//! Developer actions for exercising portals by hand.

use sg_core::{AgentId, Cell, Target};
use sg_world::{GridMap, Thing};
use tracing::info;

use crate::{PortalContext, PortalPair, PortalResult, PortalStore, find_best_exit_position};

/// x offset from the agent used by [`PortalStore::force_create_portal`].
pub const FORCE_EXIT_OFFSET: i32 = 10;

impl PortalStore {
    /// Open a pair from `agent`'s cell to the best exit ten cells east,
    /// bypassing the cost threshold and device check.
    pub fn force_create_portal(&mut self, ctx: &mut PortalContext<'_>, agent: AgentId) -> PortalResult<PortalPair> {
        let from = ctx.agents.try_get(agent)?.position;
        let target = Cell::new(from.x + FORCE_EXIT_OFFSET, from.y, from.z);
        let exit = find_best_exit_position(target, &*ctx.map, ctx.config.exit_search_radius);
        self.try_spawn_pair(ctx, agent, from, exit, Target::Cell(exit))
    }

    /// Remove every portal from the store and the map.  Returns how many
    /// were removed.
    pub fn clear_all_portals(&mut self, map: &mut GridMap) -> usize {
        let count = self.portals.len();
        for (id, _) in std::mem::take(&mut self.portals) {
            map.despawn_thing(Thing::Portal(id));
        }
        info!(count, "cleared all portals");
        count
    }
}
