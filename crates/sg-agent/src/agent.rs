//! Per-agent state as the host simulation exposes it.

use sg_core::{AgentId, Cell};
use tracing::debug;

use crate::{Job, JobCondition, PathState};

/// Allegiance of an agent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Faction {
    Player,
    #[default]
    Neutral,
    Hostile,
}

/// Broad body type.  Decides who may unload cargo after a teleport.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum AgentKind {
    #[default]
    Colonist,
    PackAnimal,
    Mech,
    Other,
}

/// Temporary incapacitation with attribution.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stun {
    pub ticks_left: u32,
    /// Agent credited with the stun.
    pub instigator: Option<AgentId>,
}

/// A single agent.
///
/// The `teleporting` flag is the re-entrancy guard: it is only ever `true`
/// inside the teleport transition, and both the movement interceptor and
/// the portal trigger check skip agents that carry it.
#[derive(Clone, Debug, Default)]
pub struct Agent {
    pub name: String,

    /// Current cell.  Meaningless while `!spawned`.
    pub position: Cell,

    /// `true` while the agent is placed in the world.
    pub spawned: bool,

    pub teleporting: bool,

    pub faction: Faction,
    pub kind: AgentKind,

    /// Directly controllable by the player even if not of the player faction.
    pub player_controlled: bool,

    pub dead: bool,
    pub downed: bool,

    /// `None` for agents that cannot be drafted at all.
    pub drafted: Option<bool>,

    pub stun: Stun,

    pub job: Option<Job>,
    pub pather: PathState,

    /// Item defs worn.
    pub apparel: Vec<String>,
    /// Item defs carried.
    pub inventory: Vec<String>,

    /// Set when the agent should drop off its carried items.
    pub unload_everything: bool,
}

impl Agent {
    pub fn new(name: impl Into<String>, position: Cell) -> Self {
        Self { name: name.into(), position, ..Self::default() }
    }

    // ── Classification ────────────────────────────────────────────────────

    /// A player-faction colonist.
    #[inline]
    pub fn is_colonist(&self) -> bool {
        self.faction == Faction::Player && self.kind == AgentKind::Colonist
    }

    #[inline]
    pub fn is_player_controlled(&self) -> bool {
        self.player_controlled
    }

    /// Player-affiliated in either sense.
    #[inline]
    pub fn is_player_aligned(&self) -> bool {
        self.faction == Faction::Player || self.player_controlled
    }

    #[inline]
    pub fn is_colonist_player_controlled(&self) -> bool {
        self.is_colonist() && self.player_controlled
    }

    #[inline]
    pub fn is_colony_mech(&self) -> bool {
        self.kind == AgentKind::Mech && self.faction == Faction::Player
    }

    // ── Liveness ──────────────────────────────────────────────────────────

    /// Alive and not downed.
    #[inline]
    pub fn is_capable(&self) -> bool {
        !self.dead && !self.downed
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun.ticks_left > 0
    }

    // ── Items ─────────────────────────────────────────────────────────────

    /// `true` if `def` is worn or carried.
    pub fn has_item(&self, def: &str) -> bool {
        self.apparel.iter().chain(&self.inventory).any(|d| d == def)
    }

    /// Carried items other than `keep`.
    pub fn cargo_excluding<'a>(&'a self, keep: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.inventory.iter().filter(move |d| d.as_str() != keep)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Replace the current job.  A job that wants travel raises
    /// `pather.needs_path`; any walk in progress is dropped.
    pub fn start_job(&mut self, job: Job, condition: JobCondition) {
        debug!(agent = %self.name, ?job, ?condition, "starting job");
        self.pather.stop();
        self.pather.needs_path = job.wants_travel();
        self.job = Some(job);
    }

    /// Mark the current job done and stand still.
    pub fn end_job(&mut self) {
        self.job = None;
        self.pather.stop();
        self.pather.needs_path = false;
    }

    /// Stun for `ticks`, keeping whichever stun lasts longer.
    pub fn stun_for(&mut self, ticks: u32, instigator: Option<AgentId>) {
        if ticks >= self.stun.ticks_left {
            self.stun = Stun { ticks_left: ticks, instigator };
        }
    }

    /// Count one tick off the stun.
    pub fn tick_stun(&mut self) {
        if self.stun.ticks_left > 0 {
            self.stun.ticks_left -= 1;
            if self.stun.ticks_left == 0 {
                self.stun.instigator = None;
            }
        }
    }
}
