//! profm Domain - Core profile types
//!
//! This crate defines the in-memory model of a profile metadata file and
//! the canonical order its compilation units are written in.
//! All types here are pure Rust with no I/O dependencies.

pub mod dex;
pub mod error;
pub mod ordering;
pub mod profile;
pub mod settings;
pub mod version;

pub use dex::{DexKey, DexProfileData};
pub use error::{FormatError, FormatResult};
pub use ordering::{canonical_order, reorder};
pub use profile::{MAX_U16_FIELD, Profile};
pub use settings::NormalizeSettings;
pub use version::{MAGIC_LEN, METADATA_MAGIC, ProfileVersion, VERSION_LEN};
