//! Error types for bday.

use thiserror::Error;

use crate::birthday::ValidationError;

/// Errors that can occur in bday operations.
///
/// The date arithmetic itself never fails; these cover the store, the
/// config file and notification delivery around it.
#[derive(Error, Debug)]
pub enum BdayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Birthday not found: {0}")]
    BirthdayNotFound(u64),

    #[error("Invalid birthday: {0}")]
    Validation(#[from] ValidationError),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for bday operations.
pub type BdayResult<T> = Result<T, BdayError>;
