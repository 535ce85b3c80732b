//! Per-file outcomes of a normalization run.

use std::path::{Path, PathBuf};

use crate::error::NormalizeError;

/// What happened to a single candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file name does not mark a profile artifact.
    Skipped,
    /// The file was already canonical and was left untouched.
    AlreadyCanonical {
        /// Number of units in the profile.
        units: usize,
    },
    /// The file was rewritten in canonical order.
    Normalized {
        /// Number of units in the profile.
        units: usize,
    },
}

/// Outcome of one candidate file.
#[derive(Debug)]
pub struct FileReport {
    /// The candidate path.
    pub path: PathBuf,
    /// The outcome, or the error that stopped processing of this file.
    pub result: Result<FileOutcome, NormalizeError>,
}

/// Outcomes of a batch, in the order the candidates were supplied.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    files: Vec<FileReport>,
}

impl NormalizeReport {
    pub(crate) fn push(&mut self, path: &Path, result: Result<FileOutcome, NormalizeError>) {
        self.files.push(FileReport {
            path: path.to_path_buf(),
            result,
        });
    }

    /// All per-file reports.
    #[must_use]
    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    /// Paths that were rewritten.
    pub fn normalized(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().filter_map(|f| match f.result {
            Ok(FileOutcome::Normalized { .. }) => Some(f.path.as_path()),
            _ => None,
        })
    }

    /// Files that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &NormalizeError)> {
        self.files
            .iter()
            .filter_map(|f| f.result.as_ref().err().map(|e| (f.path.as_path(), e)))
    }

    /// Returns true if no file failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.files.iter().all(|f| f.result.is_ok())
    }

    /// Consumes the report, returning the per-file reports.
    #[must_use]
    pub fn into_files(self) -> Vec<FileReport> {
        self.files
    }
}
