//! Error types for the runner.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that end a decoding run.
///
/// Rejected frame lines are not errors here; they are recorded in the
/// report and the run continues.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The line source could not be opened.
    #[error("cannot open {}: {source}", .path.display())]
    OpenSource {
        /// Path of the file or device.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// I/O error while reading the source or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Report or trace could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for runner operations.
pub type RunnerResult<T> = Result<T, RunnerError>;
