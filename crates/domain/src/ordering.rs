//! Canonical ordering of profile units.
//!
//! The order depends only on key values, never on insertion order, so the
//! same set of units always serializes in the same sequence.

use crate::dex::DexKey;
use crate::profile::Profile;

/// Returns the given keys in canonical order.
///
/// See [`DexKey`]'s `Ord` implementation for the comparator.
#[must_use]
pub fn canonical_order<'a, I>(keys: I) -> Vec<DexKey>
where
    I: IntoIterator<Item = &'a DexKey>,
{
    let mut ordered: Vec<DexKey> = keys.into_iter().cloned().collect();
    ordered.sort_unstable();
    ordered
}

/// Builds a new profile holding the same units in canonical order.
///
/// The input is left untouched and every payload stays attached to its key.
#[must_use]
pub fn reorder(profile: &Profile) -> Profile {
    let mut entries: Vec<_> = profile
        .iter()
        .map(|(key, data)| (key.clone(), data.clone()))
        .collect();
    entries.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
    Profile::from_ordered(profile.version(), entries.into_iter().collect())
}
