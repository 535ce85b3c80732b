//! Normalize profile use case.

use std::path::Path;

use profm_domain::{NormalizeSettings, reorder};

use crate::error::{NormalizeError, NormalizeResult};
use crate::ports::{FileSystem, ProfileCodec};
use crate::use_cases::report::{FileOutcome, NormalizeReport};

/// Rewrites profile files with their units in canonical order.
pub struct NormalizeProfile<F, C> {
    fs: F,
    codec: C,
    settings: NormalizeSettings,
}

impl<F: FileSystem, C: ProfileCodec> NormalizeProfile<F, C> {
    /// Creates a new `NormalizeProfile` use case.
    #[must_use]
    pub const fn new(fs: F, codec: C, settings: NormalizeSettings) -> Self {
        Self {
            fs,
            codec,
            settings,
        }
    }

    /// The settings this use case runs with.
    #[must_use]
    pub const fn settings(&self) -> &NormalizeSettings {
        &self.settings
    }

    /// Normalizes one candidate file.
    ///
    /// Files whose name lacks the configured suffix are skipped without being
    /// read. A profile whose units are already in canonical order is left as
    /// it is on disk. Otherwise the file is decoded, reordered and fully
    /// encoded before anything is written, so a failure leaves the file
    /// unmodified.
    ///
    /// # Errors
    /// - Returns [`NormalizeError::FileSystem`] if the file cannot be read or replaced
    /// - Returns [`NormalizeError::Format`] if the contents are not a valid profile
    pub fn execute(&self, path: &Path) -> NormalizeResult<FileOutcome> {
        if !self.settings.is_profile_artifact(path) {
            tracing::debug!(path = %path.display(), "not a profile artifact, skipping");
            return Ok(FileOutcome::Skipped);
        }

        let original = self.fs.read_file(path)?;
        let format_error = |source| NormalizeError::Format {
            path: path.to_path_buf(),
            source,
        };

        let profile = self.codec.decode(&original).map_err(format_error)?;
        let units = profile.len();
        if profile.is_canonical() && !self.settings.rewrite_unchanged {
            tracing::debug!(path = %path.display(), units, "profile already canonical");
            return Ok(FileOutcome::AlreadyCanonical { units });
        }

        let encoded = self.codec.encode(&reorder(&profile)).map_err(format_error)?;
        tracing::info!(path = %path.display(), units, "sorting profile");
        self.fs.replace_file(path, &encoded)?;
        Ok(FileOutcome::Normalized { units })
    }

    /// Normalizes every candidate, one file at a time, in the given order.
    ///
    /// A failure is recorded for its file and processing moves on to the
    /// next candidate.
    pub fn execute_all<I, P>(&self, paths: I) -> NormalizeReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = NormalizeReport::default();
        for path in paths {
            let path = path.as_ref();
            let result = self.execute(path);
            if let Err(error) = &result {
                tracing::warn!(path = %path.display(), %error, "failed to normalize profile");
            }
            report.push(path, result);
        }
        report
    }
}
