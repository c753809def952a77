//! Error types for signa-ap
//!
//! Per-token failures during playback are never errors (they fall back);
//! these cover startup, transport and collaborator failures.

use thiserror::Error;

/// Main error type for signa-ap
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors from the shared library (dictionary, config parsing)
    #[error(transparent)]
    Common(#[from] signa_common::Error),

    /// HTTP server errors
    #[error("HTTP server error: {0}")]
    Http(String),

    /// Capture or speech-to-text failed
    #[error("Transcription error: {0}")]
    Transcription(String),

    /// Playback engine errors (engine stopped, channel closed)
    #[error("Playback error: {0}")]
    Playback(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using signa-ap Error
pub type Result<T> = std::result::Result<T, Error>;
