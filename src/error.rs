// src/error.rs

//! Error types for manifest rendering

use thiserror::Error;

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving formats or rendering manifests
#[derive(Error, Debug)]
pub enum Error {
    /// Format has no layout: zero, negative, outside every range, or not a number.
    /// Carries the offending value as given.
    #[error("unsupported format {0}")]
    UnsupportedFormat(String),

    /// Flag encoding requested for a file with no flags set
    #[error("no flags are set on file {0}")]
    NoFlagsSet(String),

    /// Writing to the output sink failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
