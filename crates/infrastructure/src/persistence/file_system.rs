//! Real file system implementation.

use std::fs;
use std::io::Write;
use std::path::Path;

use profm_application::ports::{FileSystem, FileSystemError};
use tempfile::NamedTempFile;

/// Real file system implementation using `std::fs`.
///
/// Replacement writes a temporary file next to the target and renames it
/// into place, so readers see either the old or the new contents.
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Creates a new `StdFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).map_err(|e| FileSystemError::from_io(path, e))
    }

    fn replace_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_error = |e| FileSystemError::from_io(path, e);

        let mut staged = NamedTempFile::new_in(dir).map_err(io_error)?;
        staged.write_all(contents).map_err(io_error)?;
        staged.as_file().sync_all().map_err(io_error)?;

        // Keep the target's permissions rather than the temp file's 0600.
        if let Ok(metadata) = fs::metadata(path) {
            staged
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(io_error)?;
        }

        staged.persist(path).map_err(|e| io_error(e.error))?;
        Ok(())
    }
}
