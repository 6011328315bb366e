//! Error types for the Address actor.

use thiserror::Error;

/// Errors that can occur during address operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AddressError {
    /// The requested address was not found (or belongs to someone else).
    #[error("Address not found: {0}")]
    NotFound(String),

    /// The address data provided is invalid.
    #[error("Address validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for AddressError {
    fn from(msg: String) -> Self {
        AddressError::ActorCommunicationError(msg)
    }
}
