//! Fluent builder for a single [`Agent`].
//!
//! # Usage
//!
//! ```rust
//! use sg_agent::{AgentBuilder, AgentStore};
//! use sg_core::Cell;
//!
//! let mut store = AgentStore::new();
//! let id = store.push(
//!     AgentBuilder::colonist("Ada", Cell::flat(3, 4))
//!         .wearing("PortalGun_Device")
//!         .build(),
//! );
//! assert!(store.get(id).unwrap().has_item("PortalGun_Device"));
//! ```

use sg_core::Cell;

use crate::{Agent, AgentKind, Faction};

/// Fluent builder for [`Agent`].
///
/// Agents start unspawned; the sim builder places them on the map.
pub struct AgentBuilder {
    agent: Agent,
}

impl AgentBuilder {
    /// A neutral, uncontrolled agent at `position`.
    pub fn new(name: impl Into<String>, position: Cell) -> Self {
        Self { agent: Agent::new(name, position) }
    }

    /// A player-controlled colonist that can be drafted.
    pub fn colonist(name: impl Into<String>, position: Cell) -> Self {
        Self::new(name, position)
            .faction(Faction::Player)
            .kind(AgentKind::Colonist)
            .player_controlled(true)
            .draftable()
    }

    pub fn faction(mut self, faction: Faction) -> Self {
        self.agent.faction = faction;
        self
    }

    pub fn kind(mut self, kind: AgentKind) -> Self {
        self.agent.kind = kind;
        self
    }

    pub fn player_controlled(mut self, yes: bool) -> Self {
        self.agent.player_controlled = yes;
        self
    }

    pub fn draftable(mut self) -> Self {
        self.agent.drafted = Some(false);
        self
    }

    pub fn wearing(mut self, def: impl Into<String>) -> Self {
        self.agent.apparel.push(def.into());
        self
    }

    pub fn carrying(mut self, def: impl Into<String>) -> Self {
        self.agent.inventory.push(def.into());
        self
    }

    pub fn dead(mut self) -> Self {
        self.agent.dead = true;
        self
    }

    pub fn downed(mut self) -> Self {
        self.agent.downed = true;
        self
    }

    pub fn build(self) -> Agent {
        self.agent
    }
}
