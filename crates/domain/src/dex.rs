//! Compilation-unit keys and their per-unit payloads.

use std::cmp::Ordering;
use std::fmt;

/// Identifies one dex file tracked by a profile.
///
/// Every field is carried through a decode/encode cycle unchanged.
///
/// # Ordering
///
/// Keys order by `profile_key` (byte-wise over its UTF-8 encoding), then
/// `type_id_count`, then `dex_index`. Two keys compare equal only when all
/// three fields are equal, so the order is total over distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DexKey {
    /// Profile key of the dex file, e.g. `classes.dex` or `base.apk!classes2.dex`.
    pub profile_key: String,
    /// Number of type ids the dex file declares.
    pub type_id_count: u32,
    /// Index field stored alongside the key.
    pub dex_index: u16,
}

impl DexKey {
    /// Creates a new key.
    #[must_use]
    pub fn new(profile_key: impl Into<String>, type_id_count: u32, dex_index: u16) -> Self {
        Self {
            profile_key: profile_key.into(),
            type_id_count,
            dex_index,
        }
    }
}

impl Ord for DexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.profile_key
            .as_bytes()
            .cmp(other.profile_key.as_bytes())
            .then_with(|| self.type_id_count.cmp(&other.type_id_count))
            .then_with(|| self.dex_index.cmp(&other.dex_index))
    }
}

impl PartialOrd for DexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.profile_key)
    }
}

/// Hot-class payload recorded for one dex file.
///
/// The class indices are kept in stored order and are never reinterpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DexProfileData {
    classes: Vec<u16>,
}

impl DexProfileData {
    /// Creates a payload from class indices in stored order.
    #[must_use]
    pub const fn new(classes: Vec<u16>) -> Self {
        Self { classes }
    }

    /// Class indices in stored order.
    #[must_use]
    pub fn classes(&self) -> &[u16] {
        &self.classes
    }

    /// Number of class indices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if no class is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl From<Vec<u16>> for DexProfileData {
    fn from(classes: Vec<u16>) -> Self {
        Self::new(classes)
    }
}
