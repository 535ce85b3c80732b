//! Binary codec for profile metadata files.
//!
//! Layout of `METADATA_0_0_2`, all integers little-endian:
//!
//! ```text
//! magic         "prm\0"
//! version       "002\0"
//! dex_count     u16
//! uncompressed  u32   inflated body length
//! compressed    u32   zlib stream length; nothing may follow the stream
//! body          dex_count records:
//!   dex_index u16, key_len u16, key (UTF-8), type_id_count u32,
//!   class_count u16, class_count delta-encoded u16 class indices
//! ```

use profm_application::ProfileCodec;
use profm_domain::{
    DexKey, DexProfileData, FormatError, FormatResult, MAGIC_LEN, Profile, ProfileVersion,
    VERSION_LEN,
};

use super::encoding::{ByteReader, compress, decompress, put_u16, put_u32, u16_field, u32_field};

/// Codec for the supported profile metadata version.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataCodec {
    version: ProfileVersion,
}

impl MetadataCodec {
    /// Creates a codec for `METADATA_0_0_2`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            version: ProfileVersion::MetadataV002,
        }
    }

    /// Creates a codec for the given version.
    #[must_use]
    pub const fn for_version(version: ProfileVersion) -> Self {
        Self { version }
    }
}

impl ProfileCodec for MetadataCodec {
    fn version(&self) -> ProfileVersion {
        self.version
    }

    fn decode(&self, bytes: &[u8]) -> FormatResult<Profile> {
        decode_as(self.version, bytes)
    }

    fn encode(&self, profile: &Profile) -> FormatResult<Vec<u8>> {
        if profile.version() != self.version {
            return Err(FormatError::UnsupportedVersion {
                found: profile.version().name().as_bytes().to_vec(),
            });
        }
        encode(profile)
    }
}

/// Decodes a complete profile metadata file.
///
/// # Errors
///
/// - [`FormatError::BadMagic`] if the magic signature does not match
/// - [`FormatError::UnsupportedVersion`] if the version signature is not `002`
/// - [`FormatError::Truncated`] if the input ends inside a field or record, or
///   the dex file count does not cover every record in the body
/// - [`FormatError::Malformed`] for trailing bytes, bad zlib data, length
///   mismatches, invalid UTF-8 keys or duplicate keys
pub fn decode(bytes: &[u8]) -> FormatResult<Profile> {
    decode_as(ProfileVersion::MetadataV002, bytes)
}

fn decode_as(expected: ProfileVersion, bytes: &[u8]) -> FormatResult<Profile> {
    let mut reader = ByteReader::new(bytes);

    let magic = reader.read_up_to(MAGIC_LEN);
    if magic != expected.magic_bytes() {
        return Err(FormatError::BadMagic {
            expected: expected.magic_bytes().to_vec(),
            found: magic.to_vec(),
        });
    }

    let version = ProfileVersion::from_version_bytes(reader.read_up_to(VERSION_LEN))?;
    if version != expected {
        return Err(FormatError::UnsupportedVersion {
            found: version.version_bytes().to_vec(),
        });
    }

    match version {
        ProfileVersion::MetadataV002 => decode_v002(&mut reader),
    }
}

fn decode_v002(reader: &mut ByteReader<'_>) -> FormatResult<Profile> {
    let dex_count = reader.read_u16("dex file count")?;
    let uncompressed = reader.read_u32("uncompressed body size")?;
    let compressed = reader.read_u32("compressed body size")?;
    let body = reader.read_bytes(to_usize(compressed), "compressed body")?;
    if !reader.is_empty() {
        return Err(FormatError::Malformed(format!(
            "{} trailing bytes after the compressed body",
            reader.remaining()
        )));
    }

    let inflated = decompress(body, to_usize(uncompressed))?;
    tracing::trace!(
        dex_count,
        uncompressed,
        compressed,
        "decoding profile metadata body"
    );

    let mut records = ByteReader::new(&inflated);
    let mut profile = Profile::with_capacity(ProfileVersion::MetadataV002, usize::from(dex_count));
    for _ in 0..dex_count {
        let (key, data) = read_record(&mut records)?;
        profile.insert(key, data)?;
    }
    // The declared count stops short of the records in the body.
    if !records.is_empty() {
        return Err(FormatError::Truncated {
            context: "dex file count",
            needed: inflated.len(),
            available: inflated.len() - records.remaining(),
        });
    }
    Ok(profile)
}

fn read_record(reader: &mut ByteReader<'_>) -> FormatResult<(DexKey, DexProfileData)> {
    let dex_index = reader.read_u16("dex index")?;
    let key_len = reader.read_u16("profile key length")?;
    let key_bytes = reader.read_bytes(usize::from(key_len), "profile key")?;
    let profile_key = std::str::from_utf8(key_bytes)
        .map_err(|e| FormatError::Malformed(format!("profile key is not UTF-8: {e}")))?
        .to_owned();
    let type_id_count = reader.read_u32("type id count")?;
    let class_count = reader.read_u16("class count")?;

    let mut classes = Vec::with_capacity(usize::from(class_count));
    let mut previous = 0u16;
    for _ in 0..class_count {
        let class = previous.wrapping_add(reader.read_u16("class index")?);
        classes.push(class);
        previous = class;
    }

    Ok((
        DexKey {
            profile_key,
            type_id_count,
            dex_index,
        },
        DexProfileData::new(classes),
    ))
}

/// Encodes a profile, writing its units in their current order.
///
/// # Errors
///
/// Returns [`FormatError::Compression`] if the body compressor fails, or
/// [`FormatError::LimitExceeded`] if the body outgrows its `u32` size field.
pub fn encode(profile: &Profile) -> FormatResult<Vec<u8>> {
    let version = profile.version();
    let mut out = Vec::new();
    out.extend_from_slice(&version.magic_bytes());
    out.extend_from_slice(&version.version_bytes());
    match version {
        ProfileVersion::MetadataV002 => encode_v002(profile, &mut out)?,
    }
    Ok(out)
}

fn encode_v002(profile: &Profile, out: &mut Vec<u8>) -> FormatResult<()> {
    let mut body = Vec::new();
    for (key, data) in profile {
        write_record(&mut body, key, data)?;
    }
    let packed = compress(&body)?;

    put_u16(out, u16_field("dex file count", profile.len())?);
    put_u32(out, u32_field("uncompressed body size", body.len())?);
    put_u32(out, u32_field("compressed body size", packed.len())?);
    out.extend_from_slice(&packed);
    Ok(())
}

fn write_record(out: &mut Vec<u8>, key: &DexKey, data: &DexProfileData) -> FormatResult<()> {
    put_u16(out, key.dex_index);
    put_u16(out, u16_field("profile key length", key.profile_key.len())?);
    out.extend_from_slice(key.profile_key.as_bytes());
    put_u32(out, key.type_id_count);
    put_u16(out, u16_field("class count", data.len())?);

    let mut previous = 0u16;
    for &class in data.classes() {
        put_u16(out, class.wrapping_sub(previous));
        previous = class;
    }
    Ok(())
}

fn to_usize(value: u32) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
