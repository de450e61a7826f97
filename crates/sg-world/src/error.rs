//! World-subsystem error type.

use thiserror::Error;

use sg_core::Cell;

use crate::Thing;

/// Errors produced by `sg-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("map dimensions must be non-zero")]
    EmptyMap,

    #[error("cell {0} is out of bounds")]
    OutOfBounds(Cell),

    #[error("{0:?} is already spawned")]
    AlreadySpawned(Thing),

    #[error("{0:?} is not spawned")]
    NotSpawned(Thing),

    #[error("path-cost oracle fault: {0}")]
    OracleFault(String),
}

pub type WorldResult<T> = Result<T, WorldError>;
