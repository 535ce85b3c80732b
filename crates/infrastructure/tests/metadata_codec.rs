//! Codec tests against hand-assembled profile metadata files.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use pretty_assertions::assert_eq;
use profm_domain::{DexKey, DexProfileData, FormatError, Profile, ProfileVersion, reorder};
use profm_infrastructure::serialization::{compress, decompress};
use profm_infrastructure::{decode, encode};
use proptest::prelude::*;

const HEADER_LEN: usize = 18;

/// One record of the inflated body, assembled by hand.
fn record(dex_index: u16, key: &str, type_ids: u32, deltas: &[u16]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&dex_index.to_le_bytes());
    out.extend_from_slice(&u16::try_from(key.len()).unwrap().to_le_bytes());
    out.extend_from_slice(key.as_bytes());
    out.extend_from_slice(&type_ids.to_le_bytes());
    out.extend_from_slice(&u16::try_from(deltas.len()).unwrap().to_le_bytes());
    for delta in deltas {
        out.extend_from_slice(&delta.to_le_bytes());
    }
    out
}

/// A complete file around an inflated body.
fn file(dex_count: u16, body: &[u8]) -> Vec<u8> {
    let packed = compress(body).unwrap();
    let mut out = Vec::new();
    out.extend_from_slice(b"prm\0");
    out.extend_from_slice(b"002\0");
    out.extend_from_slice(&dex_count.to_le_bytes());
    out.extend_from_slice(&u32::try_from(body.len()).unwrap().to_le_bytes());
    out.extend_from_slice(&u32::try_from(packed.len()).unwrap().to_le_bytes());
    out.extend_from_slice(&packed);
    out
}

/// The inflated body of an encoded file.
fn body_of(bytes: &[u8]) -> Vec<u8> {
    let uncompressed = u32::from_le_bytes(bytes[10..14].try_into().unwrap());
    decompress(&bytes[HEADER_LEN..], uncompressed as usize).unwrap()
}

/// A sorted two-unit file whose body was deflated by zlib 1.2.13 at level 1.
const ZLIB_LEVEL_1_FILE: [u8; 63] = [
    0x70, 0x72, 0x6D, 0x00, 0x30, 0x30, 0x32, 0x00, 0x02, 0x00, 0x2E, 0x00, 0x00, 0x00, 0x2D,
    0x00, 0x00, 0x00, 0x78, 0x01, 0x63, 0x60, 0xE0, 0x64, 0x48, 0xCE, 0xCF, 0xD5, 0x4F, 0xD4,
    0x77, 0x4A, 0x2C, 0x32, 0x60, 0x60, 0x60, 0x60, 0x64, 0x60, 0x07, 0x62, 0x88, 0x60, 0x92,
    0xBE, 0x5B, 0x7E, 0x7E, 0x05, 0x50, 0x90, 0x99, 0x81, 0x09, 0x88, 0xB9, 0x18, 0x00, 0xBA,
    0x17, 0x07, 0x0C,
];

fn two_unit_file() -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let foo = record(0, "com/b/Foo", 120, &[2, 3, 10]);
    let bar = record(1, "com/a/Bar", 48, &[7]);
    let body = [foo.clone(), bar.clone()].concat();
    (file(2, &body), foo, bar)
}

#[test]
fn decodes_hand_assembled_file() {
    let (bytes, _, _) = two_unit_file();

    let profile = decode(&bytes).expect("valid profile");

    assert_eq!(profile.version(), ProfileVersion::MetadataV002);
    let entries: Vec<_> = profile.iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, &DexKey::new("com/b/Foo", 120, 0));
    assert_eq!(entries[0].1.classes(), &[2, 5, 15]);
    assert_eq!(entries[1].0, &DexKey::new("com/a/Bar", 48, 1));
    assert_eq!(entries[1].1.classes(), &[7]);
}

#[test]
fn round_trip_is_byte_identical() {
    let (bytes, _, _) = two_unit_file();
    let profile = decode(&bytes).unwrap();
    assert_eq!(encode(&profile).unwrap(), bytes);
}

#[test]
fn zlib_written_file_round_trips() {
    let profile = decode(&ZLIB_LEVEL_1_FILE).unwrap();

    let names: Vec<_> = profile.keys().map(|k| k.profile_key.as_str()).collect();
    assert_eq!(names, vec!["com/a/Bar", "com/b/Foo"]);
    assert_eq!(
        body_of(&ZLIB_LEVEL_1_FILE),
        [record(0, "com/a/Bar", 48, &[7]), record(1, "com/b/Foo", 120, &[2, 3, 10])].concat()
    );
    assert_eq!(encode(&profile).unwrap(), ZLIB_LEVEL_1_FILE);
    assert_eq!(encode(&reorder(&profile)).unwrap(), ZLIB_LEVEL_1_FILE);
}

#[test]
fn end_to_end_sorts_units_and_keeps_payload_bytes() {
    let (bytes, foo, bar) = two_unit_file();

    let sorted = reorder(&decode(&bytes).unwrap());
    let output = encode(&sorted).unwrap();

    assert_eq!(&output[..8], &bytes[..8]);
    assert_eq!(&output[8..10], &bytes[8..10]);
    let names: Vec<_> = decode(&output)
        .unwrap()
        .keys()
        .map(|k| k.profile_key.clone())
        .collect();
    assert_eq!(names, vec!["com/a/Bar", "com/b/Foo"]);
    assert_eq!(body_of(&output), [bar, foo].concat());
}

#[test]
fn altered_magic_is_rejected() {
    let (mut bytes, _, _) = two_unit_file();
    bytes[0] = b'q';

    let err = decode(&bytes).unwrap_err();

    assert!(matches!(err, FormatError::BadMagic { found, .. } if found == b"qrm\0"));
}

#[test]
fn other_version_is_rejected() {
    let (mut bytes, _, _) = two_unit_file();
    bytes[4..8].copy_from_slice(b"001\0");

    let err = decode(&bytes).unwrap_err();

    assert!(matches!(err, FormatError::UnsupportedVersion { found } if found == b"001\0"));
}

#[test]
fn every_truncation_fails() {
    let (bytes, _, _) = two_unit_file();
    for len in 0..bytes.len() {
        let err = decode(&bytes[..len]).expect_err("truncated input must fail");
        let expected = match len {
            0..4 => "bad_magic",
            4..8 => "unsupported_version",
            _ => "truncated",
        };
        assert_eq!(err.kind(), expected, "prefix of {len} bytes");
    }
}

#[test]
fn record_cut_short_is_truncated() {
    let foo = record(0, "com/b/Foo", 120, &[2, 3, 10]);
    let cut = &foo[..foo.len() - 1];

    let err = decode(&file(1, cut)).unwrap_err();

    assert!(matches!(
        err,
        FormatError::Truncated {
            context: "class index",
            needed: 2,
            available: 1
        }
    ));
}

#[test]
fn count_larger_than_body_is_truncated() {
    let body = [record(0, "a.dex", 1, &[]), record(1, "b.dex", 1, &[])].concat();

    let err = decode(&file(3, &body)).unwrap_err();

    assert!(matches!(err, FormatError::Truncated { context: "dex index", .. }));
}

#[test]
fn count_smaller_than_body_is_truncated() {
    let first = record(0, "a.dex", 1, &[]);
    let body = [first.clone(), record(1, "b.dex", 1, &[])].concat();

    let err = decode(&file(1, &body)).unwrap_err();

    assert_eq!(
        err,
        FormatError::Truncated {
            context: "dex file count",
            needed: body.len(),
            available: first.len(),
        }
    );
}

#[test]
fn trailing_bytes_are_malformed() {
    let (mut bytes, _, _) = two_unit_file();
    bytes.push(0);

    assert!(matches!(decode(&bytes), Err(FormatError::Malformed(_))));
}

#[test]
fn wrong_uncompressed_size_is_malformed() {
    let (mut bytes, _, _) = two_unit_file();
    let declared = u32::from_le_bytes(bytes[10..14].try_into().unwrap());
    bytes[10..14].copy_from_slice(&(declared + 1).to_le_bytes());

    assert!(matches!(decode(&bytes), Err(FormatError::Malformed(_))));
}

#[test]
fn duplicate_keys_are_malformed() {
    let unit = record(0, "classes.dex", 9, &[1]);
    let body = [unit.clone(), unit].concat();

    assert!(matches!(
        decode(&file(2, &body)),
        Err(FormatError::Malformed(_))
    ));
}

#[test]
fn non_utf8_key_is_malformed() {
    let mut unit = record(0, "ab", 1, &[]);
    unit[4] = 0xFF;

    assert!(matches!(
        decode(&file(1, &unit)),
        Err(FormatError::Malformed(_))
    ));
}

#[test]
fn same_name_units_stay_distinct() {
    let body = [
        record(1, "classes.dex", 20, &[1]),
        record(0, "classes.dex", 20, &[2]),
    ]
    .concat();

    let sorted = reorder(&decode(&file(2, &body)).unwrap());

    let indices: Vec<_> = sorted.keys().map(|k| k.dex_index).collect();
    assert_eq!(indices, vec![0, 1]);
    assert_eq!(
        sorted.get(&DexKey::new("classes.dex", 20, 0)),
        Some(&DexProfileData::new(vec![2]))
    );
}

fn arb_profile() -> impl Strategy<Value = Profile> {
    let unit = (
        "[a-z/]{1,12}(\\.dex)?",
        any::<u32>(),
        any::<u16>(),
        proptest::collection::vec(any::<u16>(), 0..16),
    );
    proptest::collection::vec(unit, 0..10).prop_map(|units| {
        let mut profile = Profile::new(ProfileVersion::MetadataV002);
        for (name, type_ids, index, classes) in units {
            // Duplicates generated by the strategy are simply dropped.
            let _ = profile.insert(
                DexKey::new(name, type_ids, index),
                DexProfileData::new(classes),
            );
        }
        profile
    })
}

proptest! {
    #[test]
    fn encoded_profiles_round_trip(profile in arb_profile()) {
        let bytes = encode(&profile).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(&decoded, &profile);
        prop_assert_eq!(encode(&decoded).unwrap(), bytes);
    }

    #[test]
    fn sorted_output_is_a_fixed_point(profile in arb_profile()) {
        let once = encode(&reorder(&profile)).unwrap();
        let twice = encode(&reorder(&decode(&once).unwrap())).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sorted_output_ignores_recorded_order(profile in arb_profile()) {
        let mut reversed = Profile::new(profile.version());
        let entries: Vec<_> = profile.iter().collect();
        for (key, data) in entries.into_iter().rev() {
            reversed.insert(key.clone(), data.clone()).unwrap();
        }
        prop_assert_eq!(
            encode(&reorder(&profile)).unwrap(),
            encode(&reorder(&reversed)).unwrap()
        );
    }
}
