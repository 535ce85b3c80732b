//! Application error types

use std::path::PathBuf;

use profm_domain::FormatError;
use thiserror::Error;

use crate::ports::FileSystemError;

/// Errors that abort the normalization of a single file.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The file could not be decoded or re-encoded.
    #[error("invalid profile {}: {source}", path.display())]
    Format {
        /// The file being normalized.
        path: PathBuf,
        /// The underlying format error.
        #[source]
        source: FormatError,
    },

    /// Reading or writing the file failed.
    #[error("file system error: {0}")]
    FileSystem(#[from] FileSystemError),
}

impl NormalizeError {
    /// Returns the format error, if this is one.
    #[must_use]
    pub const fn format_error(&self) -> Option<&FormatError> {
        match self {
            Self::Format { source, .. } => Some(source),
            Self::FileSystem(_) => None,
        }
    }
}

/// Result type alias for normalization operations.
pub type NormalizeResult<T> = Result<T, NormalizeError>;
