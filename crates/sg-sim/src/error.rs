use sg_agent::AgentError;
use sg_core::CoreError;
use sg_portal::PortalError;
use sg_world::WorldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("world error: {0}")]
    World(#[from] WorldError),

    #[error("portal error: {0}")]
    Portal(#[from] PortalError),
}

pub type SimResult<T> = Result<T, SimError>;
