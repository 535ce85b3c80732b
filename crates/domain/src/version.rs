//! Profile format versions.
//!
//! Only one on-disk variant is supported. Anything else found in a file,
//! or named in configuration, is rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, FormatResult};

/// Length of the magic signature in bytes.
pub const MAGIC_LEN: usize = 4;
/// Length of the version signature in bytes.
pub const VERSION_LEN: usize = 4;

/// Magic signature shared by all profile metadata files.
pub const METADATA_MAGIC: [u8; MAGIC_LEN] = *b"prm\0";

/// On-disk profile format variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProfileVersion {
    /// Profile metadata, version 0.0.2.
    #[default]
    #[serde(rename = "METADATA_0_0_2")]
    MetadataV002,
}

impl ProfileVersion {
    /// Every supported variant.
    pub const ALL: [Self; 1] = [Self::MetadataV002];

    /// Canonical textual name, as used by build tooling.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MetadataV002 => "METADATA_0_0_2",
        }
    }

    /// Magic bytes written at the start of the file.
    #[must_use]
    pub const fn magic_bytes(self) -> [u8; MAGIC_LEN] {
        match self {
            Self::MetadataV002 => METADATA_MAGIC,
        }
    }

    /// Version bytes written directly after the magic.
    #[must_use]
    pub const fn version_bytes(self) -> [u8; VERSION_LEN] {
        match self {
            Self::MetadataV002 => *b"002\0",
        }
    }

    /// Resolves a version from its on-disk version signature.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnsupportedVersion`] for any other signature.
    pub fn from_version_bytes(bytes: &[u8]) -> FormatResult<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.version_bytes().as_slice() == bytes)
            .ok_or_else(|| FormatError::UnsupportedVersion {
                found: bytes.to_vec(),
            })
    }
}

impl fmt::Display for ProfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProfileVersion {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s)
            .ok_or_else(|| FormatError::UnsupportedVersion {
                found: s.as_bytes().to_vec(),
            })
    }
}
