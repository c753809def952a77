//! Common error types for Signa

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for Signa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Signa crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML configuration file could not be parsed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON resource could not be parsed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Gloss dictionary could not be loaded
    #[error("Gloss dictionary error ({path}): {reason}")]
    Dictionary { path: PathBuf, reason: String },

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
