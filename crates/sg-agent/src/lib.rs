//! `sg-agent` — the host-side agent model the portal core reads and mutates.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`agent`]   | `Agent`, `Faction`, `AgentKind`, `Stun`                     |
//! | [`job`]     | `Job`, `JobKind`, `Urgency`, `JobCondition`                 |
//! | [`pather`]  | `PathState` — per-agent short-range walking state           |
//! | [`store`]   | `AgentStore` — `Vec<Agent>` indexed by `AgentId`            |
//! | [`builder`] | `AgentBuilder` (fluent construction)                        |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                              |
//!
//! The portal core never owns an agent.  Portals hold an `AgentId` and look
//! it up through the store each tick, so a removed agent simply stops
//! matching.

pub mod agent;
pub mod builder;
pub mod error;
pub mod job;
pub mod pather;
pub mod store;


pub use agent::{Agent, AgentKind, Faction, Stun};
pub use builder::AgentBuilder;
pub use error::{AgentError, AgentResult};
pub use job::{Job, JobCondition, JobKind, Urgency};
pub use pather::PathState;
pub use store::AgentStore;
