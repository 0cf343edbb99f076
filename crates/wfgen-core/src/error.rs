//! Error types for wfgen-core

use thiserror::Error;

/// Result type alias for wfgen-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in wfgen-core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file could not be found
    #[error("configuration file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Failed to parse YAML (project configuration or snapshot)
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Invalid configuration value
    #[error("invalid configuration: {message}")]
    ConfigInvalid {
        /// Description of what's invalid
        message: String,
    },

    /// Snapshot file has an extension we do not know how to read
    #[error("unsupported snapshot format for '{path}' (expected .yaml, .yml or .json)")]
    UnsupportedSnapshot {
        /// Path of the snapshot
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
