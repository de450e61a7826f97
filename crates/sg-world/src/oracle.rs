//! Path-cost oracle contract and reference implementations.
//!
//! # Pluggability
//!
//! The movement interceptor asks a [`PathCostOracle`] how expensive a walk
//! would be.  The oracle is authoritative and opaque: a host plugs in its
//! real pathfinder.  The two oracles shipped here are stand-ins for tests
//! and demos, not pathfinders.
//!
//! # Cost units
//!
//! Costs are unitless `u32`s on the same scale as
//! `PortalConfig::min_path_cost_threshold`.

use sg_core::{AgentId, Cell};

use crate::{WorldMap, WorldResult};

/// Result of a cost query.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PathCost {
    Cost(u32),
    /// No path exists.
    Unreachable,
}

/// Pluggable path-cost query.
///
/// An `Err` models a faulting oracle; callers recover locally and never
/// propagate it.
pub trait PathCostOracle: Send + Sync {
    fn path_cost(
        &self,
        map:   &dyn WorldMap,
        from:  Cell,
        to:    Cell,
        agent: AgentId,
    ) -> WorldResult<PathCost>;
}

// ── ChebyshevOracle ───────────────────────────────────────────────────────────

/// Cost = `cost_per_cell × Chebyshev distance`, ignoring obstacles.
///
/// Reports `Unreachable` when the destination is out of bounds or not
/// walkable.
pub struct ChebyshevOracle {
    pub cost_per_cell: u32,
}

impl Default for ChebyshevOracle {
    fn default() -> Self {
        Self { cost_per_cell: 10 }
    }
}

impl PathCostOracle for ChebyshevOracle {
    fn path_cost(&self, map: &dyn WorldMap, from: Cell, to: Cell, _agent: AgentId) -> WorldResult<PathCost> {
        if !map.walkable(to) {
            return Ok(PathCost::Unreachable);
        }
        Ok(PathCost::Cost(from.chebyshev(to).saturating_mul(self.cost_per_cell)))
    }
}

// ── FixedCostOracle ───────────────────────────────────────────────────────────

/// Answers every query with the same result.
pub struct FixedCostOracle(pub PathCost);

impl PathCostOracle for FixedCostOracle {
    fn path_cost(&self, _map: &dyn WorldMap, _from: Cell, _to: Cell, _agent: AgentId) -> WorldResult<PathCost> {
        Ok(self.0)
    }
}

/// Closures are oracles too, for faulting or scripted answers.
impl<F> PathCostOracle for F
where
    F: Fn(Cell, Cell) -> WorldResult<PathCost> + Send + Sync,
{
    fn path_cost(&self, _map: &dyn WorldMap, from: Cell, to: Cell, _agent: AgentId) -> WorldResult<PathCost> {
        self(from, to)
    }
}
