//! Error types for the assessment engine

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssessError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Ground-truth corpus yielded no usable records: {0}")]
    EmptyCorpus(PathBuf),
}

/// Result type for assessment operations
pub type Result<T> = std::result::Result<T, AssessError>;
