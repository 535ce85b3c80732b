//! The in-memory profile model.

use indexmap::IndexMap;

use crate::dex::{DexKey, DexProfileData};
use crate::error::{FormatError, FormatResult};
use crate::version::ProfileVersion;

/// Largest value a `u16` length or count field can hold.
pub const MAX_U16_FIELD: usize = u16::MAX as usize;

/// Ordered mapping from dex key to its payload.
///
/// Iteration order is the order entries were inserted, which is also the
/// order they are encoded in. Equality compares entries in order.
#[derive(Debug, Clone, Default)]
pub struct Profile {
    version: ProfileVersion,
    entries: IndexMap<DexKey, DexProfileData>,
}

impl Profile {
    /// Creates an empty profile for the given version.
    #[must_use]
    pub fn new(version: ProfileVersion) -> Self {
        Self {
            version,
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty profile with room for `capacity` units.
    #[must_use]
    pub fn with_capacity(version: ProfileVersion, capacity: usize) -> Self {
        Self {
            version,
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Wraps entries taken from an existing profile, so the invariants
    /// checked by [`Profile::insert`] already hold.
    pub(crate) const fn from_ordered(
        version: ProfileVersion,
        entries: IndexMap<DexKey, DexProfileData>,
    ) -> Self {
        Self { version, entries }
    }

    /// The format version this profile was decoded from or will be encoded as.
    #[must_use]
    pub const fn version(&self) -> ProfileVersion {
        self.version
    }

    /// Appends a unit at the end of the current order.
    ///
    /// # Errors
    ///
    /// - [`FormatError::Malformed`] if the key is already present.
    /// - [`FormatError::LimitExceeded`] if the unit count, the key length or
    ///   the class count no longer fits its `u16` field.
    pub fn insert(&mut self, key: DexKey, data: DexProfileData) -> FormatResult<()> {
        if self.entries.contains_key(&key) {
            return Err(FormatError::Malformed(format!(
                "duplicate dex key {:?}",
                key.profile_key
            )));
        }
        check_limit("dex file count", self.entries.len() + 1)?;
        check_limit("profile key length", key.profile_key.len())?;
        check_limit("class count", data.len())?;
        self.entries.insert(key, data);
        Ok(())
    }

    /// Looks up the payload for a key.
    #[must_use]
    pub fn get(&self, key: &DexKey) -> Option<&DexProfileData> {
        self.entries.get(key)
    }

    /// Iterates over entries in order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&DexKey, &DexProfileData)> {
        self.entries.iter()
    }

    /// Iterates over keys in order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &DexKey> {
        self.entries.keys()
    }

    /// Number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the profile has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the keys are already in canonical order.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.keys()
            .zip(self.keys().skip(1))
            .all(|(prev, next)| prev < next)
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.entries.iter().eq(other.entries.iter())
    }
}

impl Eq for Profile {}

impl<'a> IntoIterator for &'a Profile {
    type Item = (&'a DexKey, &'a DexProfileData);
    type IntoIter = indexmap::map::Iter<'a, DexKey, DexProfileData>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn check_limit(what: &'static str, value: usize) -> FormatResult<()> {
    if value > MAX_U16_FIELD {
        return Err(FormatError::LimitExceeded {
            what,
            value,
            limit: MAX_U16_FIELD,
        });
    }
    Ok(())
}
