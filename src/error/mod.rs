//! Error types for clamsweep.
//!
//! Only the variants of [`SweepError`] abort a run. Per-file scan failures are
//! reported as [`EngineError`](crate::engine::EngineError) and remediation
//! failures as [`RemediationOutcome::Failed`](crate::remediation::RemediationOutcome),
//! both recovered at the file boundary.

mod context;

pub use context::IoOperation;

use crate::config::ConfigError;
use crate::engine::EngineError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for a sweep run.
#[derive(Error, Debug)]
pub enum SweepError {
    /// Neither files nor directories were given.
    #[error("No files or directories specified for scanning.")]
    Usage,

    /// The scan engine could not be initialized.
    #[error("Error initializing scan engine: {0}")]
    EngineInit(#[source] EngineError),

    /// Configuration could not be loaded or was invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Filesystem operation failed.
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        path: PathBuf,
        operation: IoOperation,
        #[source]
        source: std::io::Error,
    },
}

impl SweepError {
    /// Create an I/O error with the failed operation attached.
    pub fn io(operation: IoOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation,
            source,
        }
    }
}

/// Result type alias for fallible sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
