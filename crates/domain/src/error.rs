//! Domain error types

use thiserror::Error;

/// Errors raised while decoding, building or encoding a profile.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The leading magic signature does not match the supported profile kind.
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic {
        /// The magic the supported version expects.
        expected: Vec<u8>,
        /// The bytes actually present (possibly shorter than expected).
        found: Vec<u8>,
    },

    /// The version signature is not the one supported tag.
    #[error("unsupported profile version: {found:?}")]
    UnsupportedVersion {
        /// The version bytes or name that was encountered.
        found: Vec<u8>,
    },

    /// The input ended before a field could be read in full.
    #[error("truncated input while reading {context}: needed {needed} bytes, {available} available")]
    Truncated {
        /// The field being read.
        context: &'static str,
        /// Bytes required to complete the field.
        needed: usize,
        /// Bytes left in the input.
        available: usize,
    },

    /// The input is structurally invalid.
    #[error("malformed profile: {0}")]
    Malformed(String),

    /// A value does not fit into its on-disk field.
    #[error("{what} of {value} exceeds the format limit of {limit}")]
    LimitExceeded {
        /// The quantity that overflowed.
        what: &'static str,
        /// The offending value.
        value: usize,
        /// The largest encodable value.
        limit: usize,
    },

    /// The body compressor reported an error.
    #[error("compression failed: {0}")]
    Compression(String),
}

impl FormatError {
    /// Returns a short, stable name for the error kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BadMagic { .. } => "bad_magic",
            Self::UnsupportedVersion { .. } => "unsupported_version",
            Self::Truncated { .. } => "truncated",
            Self::Malformed(_) => "malformed",
            Self::LimitExceeded { .. } => "limit_exceeded",
            Self::Compression(_) => "compression",
        }
    }
}

/// Result type alias for profile format operations.
pub type FormatResult<T> = Result<T, FormatError>;
