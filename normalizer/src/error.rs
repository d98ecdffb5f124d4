//! Error types
//!
//! [`ReportError`] explains why a test report could not be decoded; callers
//! treat it as "no outcomes" and keep going. [`GuardError`] covers the
//! project-root and persistence steps around the core, the only failures that
//! end the process.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reporter operations
pub type GuardResult<T> = Result<T, GuardError>;

/// Why a structured test report was not decoded
#[derive(Error, Debug)]
pub enum ReportError {
    /// No `{ ... }` span in the captured output
    #[error("No JSON document found in test output")]
    NoJsonFound,

    /// JSON present, but neither GoogleTest nor Catch2 markers were seen
    #[error("Unrecognized test report format")]
    UnknownFramework,

    /// Candidate text is not valid JSON
    #[error("Invalid JSON in test report: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required container is absent or not the expected container type
    #[error("Test report is missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A scalar field is present with the wrong JSON type
    #[error("Test report field '{field}' is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Failures outside the normalization core
#[derive(Error, Debug)]
pub enum GuardError {
    /// Project root was given as a relative path
    #[error("project-root must be an absolute path: {path}")]
    ProjectRootNotAbsolute { path: PathBuf },

    /// Project root does not exist on disk
    #[error("project-root does not exist: {path}")]
    ProjectRootNotFound { path: PathBuf },

    /// Filesystem operation failed
    #[error("Failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output document could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GuardError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}
