/// URL-safe Base64 encoding and decoding without padding
///
/// Used for the textual form of time-ordered and random UUIDs. Encoding
/// works on 3-byte groups; a trailing group of 1 or 2 bytes produces 2 or
/// 3 characters.
use once_cell::sync::Lazy;

/// Character set for URL-safe base64 (A-Z, a-z, 0-9, '-', '_')
const BASE64_CHARS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Lookup table for decoding base64 characters to their values
static DECODE_MAP: Lazy<[i8; 256]> = Lazy::new(|| {
    let mut map = [-1i8; 256];
    for (i, &c) in BASE64_CHARS.iter().enumerate() {
        map[c as usize] = i as i8;
    }
    map
});

/// Length of the unpadded encoding of `len` bytes
#[inline]
pub const fn encoded_len(len: usize) -> usize {
    (len * 4).div_ceil(3)
}

/// Encode bytes to an unpadded URL-safe base64 string
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(bytes.len()));

    for chunk in bytes.chunks(3) {
        let group = chunk
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &b)| acc | (u32::from(b) << (16 - 8 * i)));

        for i in 0..=chunk.len() {
            let index = (group >> (18 - 6 * i)) & 0x3F;
            out.push(BASE64_CHARS[index as usize] as char);
        }
    }

    out
}

/// Decode an unpadded URL-safe base64 string
pub fn decode(encoded: &str) -> Result<Vec<u8>, DecodeError> {
    if encoded.is_empty() {
        return Err(DecodeError::EmptyString);
    }
    if encoded.len() % 4 == 1 {
        return Err(DecodeError::InvalidLength(encoded.len()));
    }

    let mut out = Vec::with_capacity(encoded.len() * 3 / 4);
    for chunk in encoded.as_bytes().chunks(4) {
        let mut group = 0u32;
        for (i, &c) in chunk.iter().enumerate() {
            let value = DECODE_MAP[c as usize];
            if value == -1 {
                return Err(DecodeError::InvalidCharacter(c as char));
            }
            group |= (value as u32) << (18 - 6 * i);
        }

        // A short final group must not carry bits past its last byte
        let kept = 8 * (chunk.len() - 1);
        if group & ((1u32 << (24 - kept)) - 1) != 0 {
            let last = chunk[chunk.len() - 1];
            return Err(DecodeError::InvalidCharacter(last as char));
        }

        for i in 0..chunk.len() - 1 {
            out.push((group >> (16 - 8 * i)) as u8);
        }
    }

    Ok(out)
}

/// Errors that can occur during base64 decoding
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input string is empty
    #[error("Cannot decode an empty string")]
    EmptyString,

    /// The input string contains an invalid character
    #[error("Invalid base64 character: {0}")]
    InvalidCharacter(char),

    /// The input length cannot come from an unpadded encoding, or does not
    /// match the expected payload size
    #[error("Invalid encoded length: {0}")]
    InvalidLength(usize),
}
