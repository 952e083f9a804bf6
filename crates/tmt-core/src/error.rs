//! Error types for the translation service.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Missing or empty required input. User-correctable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A unique value (translation key, user email) is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
