//! profm Infrastructure - Adapters and implementations
//!
//! This crate provides the binary profile codec and the file system
//! adapter behind the ports defined in the application layer, plus the
//! entry point a build-system extension calls once a compilation step has
//! produced its outputs.

pub mod persistence;
pub mod serialization;

use std::path::Path;

use profm_application::{NormalizeProfile, NormalizeReport};
use profm_domain::NormalizeSettings;

pub use persistence::StdFileSystem;
pub use serialization::{MetadataCodec, decode, encode};

/// The normalizer wired to the real file system and the binary codec.
pub type ProfileNormalizer = NormalizeProfile<StdFileSystem, MetadataCodec>;

/// Builds a normalizer for the given settings.
#[must_use]
pub const fn normalizer(settings: NormalizeSettings) -> ProfileNormalizer {
    let codec = MetadataCodec::for_version(settings.version);
    NormalizeProfile::new(StdFileSystem::new(), codec, settings)
}

/// Normalizes every profile artifact among a compilation step's outputs.
///
/// Candidates are processed one at a time in the given order. Files whose
/// name lacks the configured suffix are skipped; a failing file is reported
/// and left unmodified while the remaining candidates are still processed.
pub fn normalize_build_outputs<I, P>(paths: I, settings: NormalizeSettings) -> NormalizeReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    normalizer(settings).execute_all(paths)
}
