use thiserror::Error;

use sg_agent::AgentError;
use sg_core::{AgentId, Cell, PortalId};
use sg_world::WorldError;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("invalid portal locations: entry={entry}, exit={exit}")]
    PlacementRejected { entry: Cell, exit: Cell },

    #[error("no safe landing cell near {0}")]
    NoLandingCell(Cell),

    #[error("agent {0} is already teleporting")]
    AlreadyTeleporting(AgentId),

    #[error("portal {0} not found")]
    NotFound(PortalId),

    #[error("portal {0} has no linked twin")]
    Unlinked(PortalId),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("save data error: {0}")]
    Persistence(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PortalResult<T> = Result<T, PortalError>;
