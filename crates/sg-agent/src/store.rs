//! `AgentStore` — every agent, indexed by `AgentId`.

use sg_core::AgentId;

use crate::{Agent, AgentError, AgentResult};

/// Dense agent storage.  `AgentId(i)` is index `i`; agents are never
/// removed, only despawned, so ids stay stable for the whole run.
#[derive(Default)]
pub struct AgentStore {
    agents: Vec<Agent>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `agent` and return its id.
    pub fn push(&mut self, agent: Agent) -> AgentId {
        let id = AgentId(self.agents.len() as u32);
        self.agents.push(agent);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        agent.index() < self.agents.len()
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&Agent> {
        self.agents.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(agent.index())
    }

    /// Like [`get`](Self::get) but as a `Result`.
    pub fn try_get(&self, agent: AgentId) -> AgentResult<&Agent> {
        self.get(agent).ok_or(AgentError::NotFound(agent))
    }

    pub fn try_get_mut(&mut self, agent: AgentId) -> AgentResult<&mut Agent> {
        self.get_mut(agent).ok_or(AgentError::NotFound(agent))
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> + '_ {
        self.agents.iter().enumerate().map(|(i, a)| (AgentId(i as u32), a))
    }
}
