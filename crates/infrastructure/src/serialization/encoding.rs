//! Little-endian primitives and zlib helpers shared by the profile codecs.

use std::io::{Read, Write};

use flate2::Compression;
use flate2::bufread::ZlibDecoder;
use flate2::write::ZlibEncoder;
use profm_domain::{FormatError, FormatResult};

/// Cursor over an input buffer that reports short reads as truncation.
#[derive(Debug)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Bytes not yet consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len()
    }

    /// Returns true if every byte has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consumes up to `len` bytes, returning fewer if the input ends first.
    pub fn read_up_to(&mut self, len: usize) -> &'a [u8] {
        let data = self.data;
        let (head, tail) = data.split_at(len.min(data.len()));
        self.data = tail;
        head
    }

    /// Consumes exactly `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] naming `context` if fewer remain.
    pub fn read_bytes(&mut self, len: usize, context: &'static str) -> FormatResult<&'a [u8]> {
        if self.data.len() < len {
            return Err(FormatError::Truncated {
                context,
                needed: len,
                available: self.data.len(),
            });
        }
        Ok(self.read_up_to(len))
    }

    /// Reads a little-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self, context: &'static str) -> FormatResult<u16> {
        let bytes = self.read_bytes(2, context)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Reads a little-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Truncated`] if fewer than 4 bytes remain.
    pub fn read_u32(&mut self, context: &'static str) -> FormatResult<u32> {
        let bytes = self.read_bytes(4, context)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// Appends a little-endian `u16`.
pub fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Appends a little-endian `u32`.
pub fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Converts a length to its `u16` field value.
///
/// # Errors
///
/// Returns [`FormatError::LimitExceeded`] if `value` does not fit.
pub fn u16_field(what: &'static str, value: usize) -> FormatResult<u16> {
    u16::try_from(value).map_err(|_| FormatError::LimitExceeded {
        what,
        value,
        limit: usize::from(u16::MAX),
    })
}

/// Converts a length to its `u32` field value.
///
/// # Errors
///
/// Returns [`FormatError::LimitExceeded`] if `value` does not fit.
pub fn u32_field(what: &'static str, value: usize) -> FormatResult<u32> {
    u32::try_from(value).map_err(|_| FormatError::LimitExceeded {
        what,
        value,
        limit: u32::MAX as usize,
    })
}

/// Compresses `data` as a zlib stream at the fastest level.
///
/// Runs on the zlib library itself, so a body deflated by zlib at level 1
/// is reproduced byte for byte.
///
/// # Errors
///
/// Returns [`FormatError::Compression`] if the encoder fails.
pub fn compress(data: &[u8]) -> FormatResult<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
    encoder
        .write_all(data)
        .map_err(|e| FormatError::Compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| FormatError::Compression(e.to_string()))
}

/// Inflates a zlib stream that must expand to exactly `expected_len` bytes.
///
/// At most `expected_len + 1` bytes are ever produced, so an oversized
/// stream is detected without inflating all of it.
///
/// # Errors
///
/// Returns [`FormatError::Malformed`] if the stream is invalid, is followed
/// by extra bytes, or inflates to a different length.
pub fn decompress(data: &[u8], expected_len: usize) -> FormatResult<Vec<u8>> {
    let limit = u64::try_from(expected_len)
        .unwrap_or(u64::MAX)
        .saturating_add(1);
    let mut inflated = Vec::with_capacity(expected_len.min(1 << 20));
    let mut decoder = ZlibDecoder::new(data).take(limit);
    decoder
        .read_to_end(&mut inflated)
        .map_err(|e| FormatError::Malformed(format!("invalid zlib body: {e}")))?;

    if inflated.len() != expected_len {
        return Err(FormatError::Malformed(format!(
            "body inflates to {} bytes but the header declares {expected_len}",
            inflated.len()
        )));
    }

    let unread = decoder.into_inner().into_inner();
    if !unread.is_empty() {
        return Err(FormatError::Malformed(format!(
            "{} bytes follow the zlib stream inside the compressed body",
            unread.len()
        )));
    }
    Ok(inflated)
}
