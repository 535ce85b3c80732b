//! Profile codec port.

use profm_domain::{FormatResult, Profile, ProfileVersion};

/// Converts between profile bytes and the in-memory model.
pub trait ProfileCodec {
    /// The format version this codec reads and writes.
    fn version(&self) -> ProfileVersion;

    /// Decodes a complete file image.
    ///
    /// # Errors
    ///
    /// Returns a [`profm_domain::FormatError`] if the bytes are not a
    /// well-formed profile of [`ProfileCodec::version`]. No partial profile
    /// is ever returned.
    fn decode(&self, bytes: &[u8]) -> FormatResult<Profile>;

    /// Encodes a profile, writing units in the profile's current order.
    ///
    /// # Errors
    ///
    /// Returns an error only if the body compressor fails.
    fn encode(&self, profile: &Profile) -> FormatResult<Vec<u8>>;
}

impl<T: ProfileCodec + ?Sized> ProfileCodec for &T {
    fn version(&self) -> ProfileVersion {
        (**self).version()
    }

    fn decode(&self, bytes: &[u8]) -> FormatResult<Profile> {
        (**self).decode(bytes)
    }

    fn encode(&self, profile: &Profile) -> FormatResult<Vec<u8>> {
        (**self).encode(profile)
    }
}
