//! `sg-core` — foundational types for the `skipgate` portal framework.
//!
//! This crate is a dependency of every other `sg-*` crate.  It intentionally
//! has no `sg-*` dependencies and few external ones (`rand`, `thiserror`,
//! `serde`, `toml`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `PortalId`, `StructureId`                   |
//! | [`cell`]     | `Cell` grid coordinate, 8-way adjacency, distances     |
//! | [`target`]   | `Target` — a destination descriptor that may be none   |
//! | [`time`]     | `Tick`, `TickClock`                                    |
//! | [`rng`]      | `SimRng` (seeded, deterministic)                       |
//! | [`config`]   | `PortalConfig`, `SimConfig`, `SkipgateConfig`          |
//! | [`error`]    | `CoreError`, `CoreResult`                              |

pub mod cell;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod target;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::Cell;
pub use config::{PortalConfig, SimConfig, SkipgateConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, PortalId, StructureId};
pub use rng::SimRng;
pub use target::Target;
pub use time::{Tick, TickClock};
