//! Custom error types for GhostSaver
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.
//!
//! Only whole-operation failures are represented here. A single file that
//! fails to copy during a snapshot or restore is recorded in the operation's
//! outcome instead, so the remaining files still get processed.

use thiserror::Error;

/// The main error type for GhostSaver operations
#[derive(Error, Debug)]
pub enum GhostSaverError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A snapshot tick could not run to completion
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// A restore could not run to completion
    #[error("Restore error: {0}")]
    Restore(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Command input errors
    #[error("Input error: {0}")]
    Input(String),
}

impl GhostSaverError {
    /// Create a "not found" error for directories
    pub fn directory_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Directory",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<std::io::Error> for GhostSaverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GhostSaverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for GhostSaver operations
pub type GhostSaverResult<T> = Result<T, GhostSaverError>;
