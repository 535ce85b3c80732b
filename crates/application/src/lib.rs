//! profm Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (file system and profile codec)
//! - The normalization use case
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{NormalizeError, NormalizeResult};
pub use ports::{FileSystem, FileSystemError, ProfileCodec};
pub use use_cases::{FileOutcome, FileReport, NormalizeProfile, NormalizeReport};
