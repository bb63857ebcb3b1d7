use thiserror::Error;
use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CarError {
    #[error("Car not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock: {0}")]
    InsufficientStock(String),
    #[error("Car validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CarError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CarError::NotFound(id),
            FrameworkError::Rejected(msg) if msg.starts_with("Insufficient stock") => CarError::InsufficientStock(msg),
            FrameworkError::Rejected(msg) => CarError::ValidationError(msg),
            other => CarError::ActorCommunicationError(other.to_string()),
        }
    }
}
