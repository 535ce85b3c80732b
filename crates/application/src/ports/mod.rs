//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod codec;
mod file_system;

pub use codec::ProfileCodec;
pub use file_system::{FileSystem, FileSystemError};
