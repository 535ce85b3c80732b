//! Normalizer settings.
//!
//! Supplied by the caller, typically deserialized from build-tool
//! configuration. Missing fields fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::version::ProfileVersion;

/// Settings controlling which files are normalized and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeSettings {
    /// File-name suffix marking a profile metadata artifact.
    #[serde(default = "default_file_suffix")]
    pub file_suffix: String,

    /// The only format version accepted and written.
    #[serde(default)]
    pub version: ProfileVersion,

    /// Rewrite files even when they are already in canonical order.
    #[serde(default)]
    pub rewrite_unchanged: bool,
}

fn default_file_suffix() -> String {
    ".profm".to_string()
}

impl Default for NormalizeSettings {
    fn default() -> Self {
        Self {
            file_suffix: default_file_suffix(),
            version: ProfileVersion::default(),
            rewrite_unchanged: false,
        }
    }
}

impl NormalizeSettings {
    /// Returns true if the file name of `path` carries the configured suffix.
    ///
    /// Only the name is inspected; the contents are never sniffed.
    #[must_use]
    pub fn is_profile_artifact(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| {
            name.as_encoded_bytes()
                .ends_with(self.file_suffix.as_bytes())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = NormalizeSettings::default();
        assert_eq!(settings.file_suffix, ".profm");
        assert_eq!(settings.version, ProfileVersion::MetadataV002);
        assert!(!settings.rewrite_unchanged);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings: NormalizeSettings =
            serde_json::from_str(r#"{"rewrite_unchanged": true}"#).expect("valid settings");
        assert_eq!(settings.file_suffix, ".profm");
        assert!(settings.rewrite_unchanged);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let result = serde_json::from_str::<NormalizeSettings>(r#"{"version": "METADATA_1_0_0"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn suffix_check_uses_file_name_only() {
        let settings = NormalizeSettings::default();
        assert!(settings.is_profile_artifact(Path::new(
            "build/outputs/dexmetadata/release/baseline.profm"
        )));
        assert!(!settings.is_profile_artifact(Path::new("build/baseline.prof")));
        assert!(!settings.is_profile_artifact(Path::new("build/x.profm/baseline.txt")));
        assert!(!settings.is_profile_artifact(Path::new("/")));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_still_matched() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let settings = NormalizeSettings::default();
        let name = OsStr::from_bytes(b"base\xFFline.profm");
        assert!(settings.is_profile_artifact(&Path::new("build").join(name)));
        assert!(!settings.is_profile_artifact(Path::new(OsStr::from_bytes(b"\xFF.prof"))));
    }
}
