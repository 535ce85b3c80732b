//! Binary serialization for profile metadata files.
//!
//! Output is fully determined by the profile:
//! - Units are written in the profile's current order
//! - The body is compressed at a fixed level
//! - No timestamps or host-dependent fields are emitted

mod encoding;
mod metadata;

pub use encoding::{ByteReader, compress, decompress};
pub use metadata::{MetadataCodec, decode, encode};
