//! `sg-world` — the host map and the contracts the portal core needs from it.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`map`]     | `GridMap` (terrain, occupancy, structures, fog), `WorldMap`, `Thing` |
//! | [`radial`]  | `ring_cells`, `cells_within` — stable ring enumeration        |
//! | [`oracle`]  | `PathCostOracle` trait, `PathCost`, reference oracles         |
//! | [`error`]   | `WorldError`, `WorldResult<T>`                                |
//!
//! # Contracts
//!
//! The placement validator and exit finder only read the map through the
//! [`WorldMap`] trait.  Placement and removal go through `GridMap`'s
//! `spawn_thing` / `despawn_thing`, which keep the per-cell occupancy index
//! and the reverse `Thing → Cell` index in step so an occupancy read never
//! sees a half-completed placement.

pub mod error;
pub mod map;
pub mod oracle;
pub mod radial;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use map::{GridMap, Structure, Thing, WorldMap};
pub use oracle::{ChebyshevOracle, FixedCostOracle, PathCost, PathCostOracle};
pub use radial::{cells_within, ring_cells};
