//! Error types for tree generation
//!
//! Every failure aborts the run. Configuration problems are detected before the first
//! file is written; I/O faults leave already-written files in place.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the library and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad tree configuration, settings file, or logging option
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The requested output root already exists
    #[error("Output directory already exists: {}", .0.display())]
    OutputConflict(PathBuf),

    /// Directory creation or file write failed
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A worker task panicked or the worker pool could not start
    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

impl ApiError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ApiError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
