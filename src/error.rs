//! Domain-specific error types for the outreach engine

use thiserror::Error;
use uuid::Uuid;

/// Main error type for the outreach engine.
///
/// Generation failures never appear here: the orchestrator absorbs them and
/// degrades to its fallback templates.
#[derive(Error, Debug)]
pub enum OutreachError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Engagement event {id} not found")]
    NotFound { id: Uuid },

    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for OutreachError {
    fn from(err: anyhow::Error) -> Self {
        OutreachError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for OutreachError {
    fn from(err: serde_json::Error) -> Self {
        OutreachError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for OutreachError {
    fn from(err: rusqlite::Error) -> Self {
        OutreachError::Persistence {
            message: err.to_string(),
        }
    }
}

impl From<chrono::ParseError> for OutreachError {
    fn from(err: chrono::ParseError) -> Self {
        OutreachError::Serialization {
            message: format!("Date parsing error: {}", err),
        }
    }
}

/// Result type alias for outreach engine operations
pub type Result<T> = std::result::Result<T, OutreachError>;
