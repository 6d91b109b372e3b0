//! Error Handling Module
//!
//! Defines the error types used across foldprep.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for fold preparation operations
#[derive(Error, Debug)]
pub enum FoldError {
    /// The origin dataset directory has no label file
    #[error("No label file found in '{0}' (expected Labels.txt)")]
    MissingLabelFile(PathBuf),

    /// Requested fold count is not usable
    #[error("Invalid fold count {0}: at least one fold is required")]
    InvalidFoldCount(usize),

    /// Train fraction outside the open interval (0, 1)
    #[error("Invalid train fraction {0}: must be strictly between 0 and 1")]
    InvalidTrainFraction(f64),

    /// A relocation destination already exists
    #[error(
        "Destination '{0}' already exists. Check that the output directory is completely empty before re-running"
    )]
    DestinationConflict(PathBuf),

    /// Invalid combination of arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error from a filesystem primitive
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FoldError {
    fn from(err: serde_json::Error) -> Self {
        FoldError::Serialization(err.to_string())
    }
}

/// Convenience Result type for fold preparation operations
pub type Result<T> = std::result::Result<T, FoldError>;
