//! `sg-portal` — the portal decision-and-lifecycle engine.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`placement`] | `is_valid_portal_location`, `find_best_exit_position`, `find_landing_cell` |
//! | [`portal`]    | `Portal`, `PortalState`, inspect summary                      |
//! | [`store`]     | `PortalStore` — live portals, pair teardown                   |
//! | [`spawner`]   | `PortalStore::try_spawn_pair`, `PortalPair`                   |
//! | [`lifecycle`] | per-tick expiry and trigger detection, `PortalOutcome`        |
//! | [`teleport`]  | the teleport transition                                       |
//! | [`effects`]   | `EffectSink`, `Effect`, `TeleportEvent`, sinks                |
//! | [`context`]   | `PortalContext<'a>` — mutable world borrows for one call      |
//! | [`persist`]   | `PortalRecord`, save/restore with link self-healing           |
//! | [`debug`]     | force-create and clear-all actions                            |
//! | [`error`]     | `PortalError`, `PortalResult<T>`                              |
//!
//! # Lifecycle
//!
//! ```text
//! Active ──(owner steps on entry)──▶ Triggered ──(teleport done)──▶ Consumed
//!   │
//!   └──(spawn_tick + duration reached)──▶ Expired ──────────────▶ Consumed
//! ```
//!
//! A pair is spawned atomically and torn down atomically: destroying either
//! half clears both links and removes both from the map.  `Consumed`
//! portals no longer exist in the store.

pub mod context;
pub mod debug;
pub mod effects;
pub mod error;
pub mod lifecycle;
pub mod persist;
pub mod placement;
pub mod portal;
pub mod spawner;
pub mod store;
pub mod teleport;


pub use context::PortalContext;
pub use effects::{Effect, EffectError, EffectSink, NoopEffects, RecordingSink, TeleportEvent};
pub use error::{PortalError, PortalResult};
pub use lifecycle::PortalOutcome;
pub use persist::{PortalRecord, SaveFile};
pub use placement::{find_best_exit_position, find_landing_cell, is_valid_portal_location};
pub use portal::{Portal, PortalState};
pub use spawner::PortalPair;
pub use store::PortalStore;
