//! Error types for the multiplayer session log.
//!
//! None of these ever reach the host from the session core itself: sink
//! failures degrade the session instead. They are returned by the setup
//! layers (configuration loading, diagnostic logging) and by sink
//! implementations so the session can record why it was disabled.

use std::path::PathBuf;
use thiserror::Error;

/// Persistent sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to open log file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Sink unavailable: {0}")]
    Unavailable(String),
}

/// Configuration and setup errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Invalid(String),

    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("Configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}
