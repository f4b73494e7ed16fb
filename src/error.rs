//! Error types for deck_render

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for deck_render operations
#[derive(Debug, Error)]
pub enum DeckError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Content store answered with a non-success status
    #[error("HTTP error: {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
    /// File system operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A database record lacks a property its card type requires
    #[error("Malformed record for card {code}: {reason}")]
    MalformedRecord { code: String, reason: String },
    /// Deck definition file does not have the expected shape
    #[error("Invalid deck file {}: {reason}", .path.display())]
    DeckFormat { path: PathBuf, reason: String },
    /// Template could not be compiled or rendered
    #[error("Template error: {0}")]
    Template(#[from] mustache::Error),
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
    /// A spawned task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl DeckError {
    /// Wrap an I/O error together with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeckError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for deck_render operations
pub type Result<T> = std::result::Result<T, DeckError>;
