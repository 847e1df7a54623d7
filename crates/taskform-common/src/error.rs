//! Unified error types for the taskform workspace.
//!
//! The translator itself can only fail with `MissingAttribute`; the
//! remaining variants cover the file boundaries around it.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum TaskformError {
    /// A record under translation is missing a required attribute.
    #[error("{kind} entry {index}: missing {attribute}")]
    MissingAttribute {
        /// Record type the entry belongs to.
        kind: &'static str,
        /// Zero-based position of the entry in its list.
        index: usize,
        /// Name of the absent attribute.
        attribute: &'static str,
    },

    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A task definition document could not be parsed.
    #[error("invalid task definition: {source}")]
    Json {
        /// Underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// A compose descriptor could not be serialized.
    #[error("compose serialization error: {source}")]
    Yaml {
        /// Underlying YAML error.
        #[from]
        source: serde_yaml::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, TaskformError>;
