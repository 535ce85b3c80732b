//! File system abstraction port.

use std::path::{Path, PathBuf};

/// Error type for file system operations.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// File not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FileSystemError {
    /// Maps an I/O error on `path` to the matching variant.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io(error),
        }
    }
}

/// Abstraction over the file operations the normalizer needs.
///
/// This trait allows mocking file system access in tests.
pub trait FileSystem {
    /// Reads a file's contents as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError>;

    /// Replaces a file's contents.
    ///
    /// Implementations must either install the full contents or leave the
    /// existing file untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn replace_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        (**self).read_file(path)
    }

    fn replace_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        (**self).replace_file(path, contents)
    }
}
