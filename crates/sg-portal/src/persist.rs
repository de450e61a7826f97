//! Save records and restore.
//!
//! Each portal persists its link and owner by id, its spawn tick, its role,
//! and its original destination.  Restore rebuilds every link before any
//! tick can run; a link survives only if both ends exist and point at each
//! other, otherwise the portal comes back unlinked and simply expires.

use std::collections::{BTreeMap, HashSet};
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use sg_agent::AgentStore;
use sg_core::{AgentId, Cell, PortalId, Target, Tick};
use sg_world::{GridMap, Thing, WorldMap};
use tracing::{info, warn};

use crate::{Portal, PortalResult, PortalState, PortalStore};

/// Format version written by [`PortalStore::save_json`].
pub const SAVE_VERSION: u32 = 1;

/// The persisted form of one portal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalRecord {
    pub id:         PortalId,
    pub position:   Cell,
    pub linked:     Option<PortalId>,
    pub owner:      Option<AgentId>,
    pub spawn_tick: Tick,
    pub is_entry:   bool,
    #[serde(default)]
    pub original_destination: Target,
}

/// Top-level save document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    /// Next id to allocate, so restored runs never reuse an id.
    pub next_id: u32,
    pub portals: Vec<PortalRecord>,
}

impl SaveFile {
    /// Parse a save without touching any world state.
    pub fn read_json<R: Read>(reader: R) -> PortalResult<SaveFile> {
        let save: SaveFile = serde_json::from_reader(reader)?;
        if save.version != SAVE_VERSION {
            warn!(version = save.version, "unexpected portal save version; loading anyway");
        }
        Ok(save)
    }
}

impl From<&Portal> for PortalRecord {
    fn from(p: &Portal) -> Self {
        Self {
            id:         p.id,
            position:   p.position,
            linked:     p.linked,
            owner:      p.owner,
            spawn_tick: p.spawn_tick,
            is_entry:   p.is_entry,
            original_destination: p.original_destination,
        }
    }
}

impl PortalStore {
    /// Records for every live portal, in id order.
    pub fn to_records(&self) -> Vec<PortalRecord> {
        self.iter().map(PortalRecord::from).collect()
    }

    pub fn to_save_file(&self) -> SaveFile {
        SaveFile { version: SAVE_VERSION, next_id: self.next_id, portals: self.to_records() }
    }

    /// Rebuild a store from `records`, placing every portal on `map`.
    ///
    /// Records that are out of bounds or repeat an id are dropped.  Owners
    /// missing from `agents` restore as `None`.  If any portal cannot be
    /// placed (its id is already on the map) the ones placed so far are
    /// removed again and the map is left as it was.
    pub fn restore(
        records: Vec<PortalRecord>,
        next_id: u32,
        map:     &mut GridMap,
        agents:  &AgentStore,
    ) -> PortalResult<PortalStore> {
        let mut kept: BTreeMap<PortalId, PortalRecord> = BTreeMap::new();
        for rec in records {
            if !map.in_bounds(rec.position) {
                warn!(portal = %rec.id, cell = %rec.position, "dropping out-of-bounds portal record");
                continue;
            }
            if kept.contains_key(&rec.id) {
                warn!(portal = %rec.id, "dropping duplicate portal record");
                continue;
            }
            kept.insert(rec.id, rec);
        }

        let mutual: HashSet<PortalId> = kept
            .values()
            .filter(|r| {
                r.linked
                    .and_then(|t| kept.get(&t))
                    .is_some_and(|twin| twin.linked == Some(r.id) && twin.id != r.id)
            })
            .map(|r| r.id)
            .collect();

        let max_id = kept.keys().next_back().map_or(0, |id| id.0 + 1);
        let mut store = PortalStore { portals: BTreeMap::new(), next_id: next_id.max(max_id) };

        let mut placed: Vec<PortalId> = Vec::with_capacity(kept.len());
        for (&id, rec) in &kept {
            if let Err(e) = map.spawn_thing(Thing::Portal(id), rec.position) {
                for &done in &placed {
                    map.despawn_thing(Thing::Portal(done));
                }
                warn!(portal = %id, error = %e, "portal restore failed; rolled back");
                return Err(e.into());
            }
            placed.push(id);
        }

        for (id, rec) in kept {
            let linked = rec.linked.filter(|_| mutual.contains(&id));
            if rec.linked.is_some() && linked.is_none() {
                warn!(portal = %id, "portal link not mutual; restored unlinked");
            }
            let owner = rec.owner.filter(|&a| agents.contains(a));
            store.portals.insert(id, Portal {
                id,
                position: rec.position,
                linked,
                owner,
                spawn_tick: rec.spawn_tick,
                is_entry: rec.is_entry,
                original_destination: rec.original_destination,
                state: PortalState::Active,
                entry_cued: false,
            });
        }

        info!(portals = store.len(), "portals restored");
        Ok(store)
    }

    pub fn save_json<W: Write>(&self, writer: W) -> PortalResult<()> {
        serde_json::to_writer_pretty(writer, &self.to_save_file())?;
        Ok(())
    }

    pub fn load_json<R: Read>(reader: R, map: &mut GridMap, agents: &AgentStore) -> PortalResult<PortalStore> {
        let save = SaveFile::read_json(reader)?;
        Self::restore(save.portals, save.next_id, map, agents)
    }
}
