//! `sg-sim` — tick loop orchestrator and movement interceptor.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Portals  — every live portal, ascending PortalId: expiry, then
//!                trigger detection and teleport.  An expired pair's owner
//!                with an unfinished walk is flagged to re-path.
//!   ② Requests — every agent whose job raised `needs_path`, ascending
//!                AgentId, goes through the MovementInterceptor.  Handled
//!                requests leave the agent standing on its new entry
//!                portal; the rest start walking.
//!   ③ Walk     — one Chebyshev step per tick toward the pather
//!                destination for every capable, unstunned walker.
//!   ④ Stun     — every stun counts down one tick.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sg_agent::AgentBuilder;
//! use sg_core::{AgentId, Cell, SkipgateConfig};
//! use sg_portal::NoopEffects;
//! use sg_sim::{NoopObserver, SimBuilder};
//! use sg_world::{ChebyshevOracle, GridMap};
//!
//! let mut sim = SimBuilder::new(SkipgateConfig::default(), GridMap::new(64, 64)?, ChebyshevOracle::default(), NoopEffects)
//!     .agent(AgentBuilder::colonist("Ada", Cell::flat(2, 2)).wearing("PortalGun_Device").build())
//!     .build()?;
//! sim.order_goto(AgentId(0), Cell::flat(60, 60))?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod interceptor;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use interceptor::{Interception, MovementInterceptor, PassReason, PortalPlan};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
