//! Error handling for the insight engine.
//!
//! The engine itself only fails on structurally invalid filter
//! configurations. Everything else in here comes from the loader layer.

pub mod util;

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for the insight engine and its loaders
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// Filter configuration with the wrong number or order of groups or operators
    #[error("Invalid filter configuration: {0}")]
    InvalidFilterConfiguration(String),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error reading a file, with the offending path
    #[error("IO error at {path}: {message}")]
    PathError {
        /// Path that failed
        path: PathBuf,
        /// Description of the failure
        message: String,
    },

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error decoding Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error converting Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Record source that the loader does not know how to read
    #[error("Unsupported record source: {0}")]
    UnsupportedSource(String),

    /// Async task failure while loading
    #[error("Load task failed: {0}")]
    Task(String),
}

impl InsightError {
    /// Create an invalid filter configuration error
    #[must_use]
    pub fn invalid_filter(message: impl Into<String>) -> Self {
        Self::InvalidFilterConfiguration(message.into())
    }

    /// Create a path error
    #[must_use]
    pub fn path(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PathError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for insight engine operations
pub type Result<T> = std::result::Result<T, InsightError>;
