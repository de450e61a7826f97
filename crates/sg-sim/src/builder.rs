//! Fluent builder for constructing a [`Sim`].

use sg_agent::{Agent, AgentStore};
use sg_core::{SimRng, SkipgateConfig};
use sg_portal::{EffectSink, PortalStore};
use sg_world::{GridMap, PathCostOracle, Thing};
use tracing::info;

use crate::{MovementInterceptor, Sim, SimResult};

/// Fluent builder for [`Sim<O, E>`].
///
/// # Required inputs
///
/// - [`SkipgateConfig`] — sim and portal tables
/// - [`GridMap`] — terrain, structures, fog
/// - `O: PathCostOracle` — the host's cost query
/// - `E: EffectSink` — cue and notification receiver
///
/// # Optional inputs
///
/// | Method          | Default      |
/// |-----------------|--------------|
/// | `.agent(a)`     | no agents    |
/// | `.agents(iter)` | no agents    |
///
/// Agents are placed on the map at their `position` during `build`.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, map, ChebyshevOracle::default(), NoopEffects)
///     .agent(AgentBuilder::colonist("Ada", Cell::flat(2, 2)).build())
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<O: PathCostOracle, E: EffectSink> {
    config:  SkipgateConfig,
    map:     GridMap,
    agents:  Vec<Agent>,
    oracle:  O,
    effects: E,
}

impl<O: PathCostOracle, E: EffectSink> SimBuilder<O, E> {
    pub fn new(config: SkipgateConfig, map: GridMap, oracle: O, effects: E) -> Self {
        Self { config, map, agents: Vec::new(), oracle, effects }
    }

    /// Add one agent.  Ids are assigned in insertion order from 0.
    pub fn agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn agents(mut self, agents: impl IntoIterator<Item = Agent>) -> Self {
        self.agents.extend(agents);
        self
    }

    /// Validate the configuration, place every agent, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<O, E>> {
        self.config.sim.validate()?;
        self.config.portal.validate()?;

        let mut map = self.map;
        let mut store = AgentStore::new();
        for mut agent in self.agents {
            let cell = agent.position;
            agent.spawned = true;
            let id = store.push(agent);
            map.spawn_thing(Thing::Agent(id), cell)?;
        }
        info!(agents = store.len(), "simulation built");

        Ok(Sim {
            clock:         self.config.sim.make_clock(),
            rng:           SimRng::new(self.config.sim.seed),
            config:        self.config.sim,
            portal_config: self.config.portal,
            map,
            agents:        store,
            portals:       PortalStore::new(),
            interceptor:   MovementInterceptor::new(self.oracle),
            effects:       self.effects,
        })
    }
}
