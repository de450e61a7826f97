//! Grid map representation.
//!
//! # Data layout
//!
//! Per-cell arrays (`walkable`, `fogged`, `things`) are row-major over the
//! x/z plane: index = `z * width + x`.  The occupancy index stores every
//! spawned [`Thing`] in its cell's `Vec`, and a reverse map records where
//! each thing stands so `despawn_thing` is O(things in that cell).

use std::collections::VecDeque;

use sg_core::{AgentId, Cell, PortalId, StructureId};
use tracing::debug;

use crate::{WorldError, WorldResult};

/// Reverse occupancy index: where each spawned thing stands.
#[cfg(feature = "fx-hash")]
type PositionIndex = rustc_hash::FxHashMap<Thing, Cell>;
#[cfg(not(feature = "fx-hash"))]
type PositionIndex = std::collections::HashMap<Thing, Cell>;

// ── Thing ─────────────────────────────────────────────────────────────────────

/// Anything that can occupy a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Thing {
    Agent(AgentId),
    Portal(PortalId),
    Structure(StructureId),
}

/// A placed building or piece of furniture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Structure {
    pub def: String,
    /// Walls and the like; nothing may stand on or spawn onto the cell.
    pub impassable: bool,
}

// ── WorldMap ──────────────────────────────────────────────────────────────────

/// Read-only map queries used by placement and landing searches.
pub trait WorldMap {
    fn in_bounds(&self, cell: Cell) -> bool;

    /// Terrain is traversable.  Out-of-bounds cells are never walkable.
    fn walkable(&self, cell: Cell) -> bool;

    /// Everything currently spawned at `cell`.  Empty out of bounds.
    fn things_at(&self, cell: Cell) -> &[Thing];

    fn structure(&self, id: StructureId) -> Option<&Structure>;

    fn is_fogged(&self, cell: Cell) -> bool;

    /// The map is a player-controlled base.
    fn is_player_home(&self) -> bool;

    /// `true` for impassable structures.
    fn is_impassable(&self, thing: Thing) -> bool {
        match thing {
            Thing::Structure(id) => self.structure(id).is_some_and(|s| s.impassable),
            _ => false,
        }
    }
}

// ── GridMap ───────────────────────────────────────────────────────────────────

/// A single-level rectangular map.
pub struct GridMap {
    width:      i32,
    height:     i32,
    walkable:   Vec<bool>,
    fogged:     Vec<bool>,
    things:     Vec<Vec<Thing>>,
    positions:  PositionIndex,
    structures: Vec<Structure>,
    player_home: bool,
}

impl GridMap {
    /// An all-walkable, unfogged map of `width × height` cells.
    pub fn new(width: u32, height: u32) -> WorldResult<Self> {
        if width == 0 || height == 0 {
            return Err(WorldError::EmptyMap);
        }
        let n = width as usize * height as usize;
        Ok(Self {
            width:       width as i32,
            height:      height as i32,
            walkable:    vec![true; n],
            fogged:      vec![false; n],
            things:      vec![Vec::new(); n],
            positions:   PositionIndex::default(),
            structures:  Vec::new(),
            player_home: false,
        })
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    #[inline]
    fn idx(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.z as usize * self.width as usize + cell.x as usize)
    }

    // ── Terrain and fog ───────────────────────────────────────────────────

    pub fn set_walkable(&mut self, cell: Cell, walkable: bool) -> WorldResult<()> {
        let i = self.idx(cell).ok_or(WorldError::OutOfBounds(cell))?;
        self.walkable[i] = walkable;
        Ok(())
    }

    pub fn set_fogged(&mut self, cell: Cell, fogged: bool) -> WorldResult<()> {
        let i = self.idx(cell).ok_or(WorldError::OutOfBounds(cell))?;
        self.fogged[i] = fogged;
        Ok(())
    }

    /// Fog every cell.
    pub fn fog_all(&mut self) {
        self.fogged.iter_mut().for_each(|f| *f = true);
    }

    pub fn set_player_home(&mut self, home: bool) {
        self.player_home = home;
    }

    /// Reveal the fogged region connected to `origin`.
    ///
    /// Breadth-first over 8-neighbours: every fogged cell reached is
    /// revealed, but only walkable cells are expanded further, so walls
    /// bounding the region are revealed without leaking past them.
    /// Returns the number of cells revealed.
    pub fn flood_unfog(&mut self, origin: Cell) -> usize {
        let Some(start) = self.idx(origin) else { return 0 };
        if !self.fogged[start] {
            return 0;
        }
        let mut revealed = 0;
        let mut queue = VecDeque::from([origin]);
        self.fogged[start] = false;
        while let Some(cell) = queue.pop_front() {
            revealed += 1;
            if !self.walkable(cell) {
                continue;
            }
            for next in cell.adjacent_8() {
                if let Some(i) = self.idx(next) {
                    if self.fogged[i] {
                        self.fogged[i] = false;
                        queue.push_back(next);
                    }
                }
            }
        }
        debug!(cell = %origin, revealed, "flood unfog");
        revealed
    }

    // ── Structures ────────────────────────────────────────────────────────

    /// Place a new structure at `cell` and return its id.
    pub fn add_structure(&mut self, def: impl Into<String>, impassable: bool, cell: Cell) -> WorldResult<StructureId> {
        let id = StructureId(self.structures.len() as u32);
        self.spawn_thing(Thing::Structure(id), cell)?;
        self.structures.push(Structure { def: def.into(), impassable });
        Ok(id)
    }

    /// A straight run of impassable `"Wall"` structures from `from` to `to`
    /// (inclusive), stepping one Chebyshev cell at a time.
    pub fn add_wall(&mut self, from: Cell, to: Cell) -> WorldResult<()> {
        let mut cell = from;
        loop {
            self.add_structure("Wall", true, cell)?;
            if cell == to {
                return Ok(());
            }
            cell = cell.step_toward(to);
        }
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Place `thing` at `cell`.
    pub fn spawn_thing(&mut self, thing: Thing, cell: Cell) -> WorldResult<()> {
        let i = self.idx(cell).ok_or(WorldError::OutOfBounds(cell))?;
        if self.positions.contains_key(&thing) {
            return Err(WorldError::AlreadySpawned(thing));
        }
        self.things[i].push(thing);
        self.positions.insert(thing, cell);
        Ok(())
    }

    /// Remove `thing` from the map, returning the cell it stood on.
    pub fn despawn_thing(&mut self, thing: Thing) -> Option<Cell> {
        let cell = self.positions.remove(&thing)?;
        if let Some(i) = self.idx(cell) {
            self.things[i].retain(|t| *t != thing);
        }
        Some(cell)
    }

    /// Move a spawned `thing` to `to`.  The destination is checked before
    /// anything is touched, so a failed move leaves the map unchanged.
    pub fn move_thing(&mut self, thing: Thing, to: Cell) -> WorldResult<Cell> {
        if !self.in_bounds(to) {
            return Err(WorldError::OutOfBounds(to));
        }
        let from = self.despawn_thing(thing).ok_or(WorldError::NotSpawned(thing))?;
        self.spawn_thing(thing, to)?;
        Ok(from)
    }

    #[inline]
    pub fn position_of(&self, thing: Thing) -> Option<Cell> {
        self.positions.get(&thing).copied()
    }

    #[inline]
    pub fn is_spawned(&self, thing: Thing) -> bool {
        self.positions.contains_key(&thing)
    }

    /// Agents standing at `cell`.
    pub fn agents_at(&self, cell: Cell) -> impl Iterator<Item = AgentId> + '_ {
        self.things_at(cell).iter().filter_map(|t| match t {
            Thing::Agent(a) => Some(*a),
            _ => None,
        })
    }
}

impl WorldMap for GridMap {
    #[inline]
    fn in_bounds(&self, cell: Cell) -> bool {
        cell.y == 0 && cell.x >= 0 && cell.z >= 0 && cell.x < self.width && cell.z < self.height
    }

    #[inline]
    fn walkable(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| self.walkable[i])
    }

    fn things_at(&self, cell: Cell) -> &[Thing] {
        match self.idx(cell) {
            Some(i) => &self.things[i],
            None => &[],
        }
    }

    fn structure(&self, id: StructureId) -> Option<&Structure> {
        self.structures.get(id.index())
    }

    fn is_fogged(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|i| self.fogged[i])
    }

    fn is_player_home(&self) -> bool {
        self.player_home
    }
}
