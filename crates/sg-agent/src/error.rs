use sg_core::AgentId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent {0} not found")]
    NotFound(AgentId),
}

pub type AgentResult<T> = Result<T, AgentError>;
