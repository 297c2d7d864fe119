use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Agent not found: {id}")]
    AgentNotFound { id: String },

    #[error("Invalid command: {reason}")]
    InvalidCommand { reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Expected outcomes of a route request that are reported to the user
/// instead of failing the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Please select a player first.")]
    NoAgentSelected,

    #[error("Selected player not found: {id}")]
    UnknownAgent { id: String },

    #[error("No path found from {agent_id} to opponent's goal {goal}.")]
    NoPathFound { agent_id: String, goal: String },
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
