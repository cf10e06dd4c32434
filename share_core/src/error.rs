//! Error types for the share_core library.

use std::io;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for share_core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Filesystem or stream failure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file could not be parsed
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Snapshot payload could not be decoded
    #[error("Decode error: {0}")]
    Decode(#[from] crate::codec::DecodeError),

    /// Input rejected by a bounds or consistency check
    #[error("Validation error: {0}")]
    Validation(String),

    /// A referenced entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Config contents failed validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catch-all for one-off failures
    #[error("{0}")]
    Other(String),
}
