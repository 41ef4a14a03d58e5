use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;

use super::machine::{munged_address, ADDRESS_LEN};
use crate::base64::{self, DecodeError};

/// Bytes in a time-ordered UUID: 6 timestamp, 6 address, 3 sequence
pub const RAW_LEN: usize = 15;
/// Characters in the encoded form
pub const ENCODED_LEN: usize = 20;

const TIMESTAMP_LEN: usize = 6;
const SEQUENCE_MASK: u32 = 0x00FF_FFFF;

/// Generator of time-ordered, URL-safe textual IDs that need no worker
/// configuration.
///
/// Layout (big-endian): 48-bit timestamp, 48-bit munged machine address,
/// 24-bit sequence, encoded as 20 characters of unpadded URL-safe Base64.
/// The alphabet is not in ASCII order, so the strings themselves are not
/// guaranteed to sort like their timestamps; decode with
/// [`extract_timestamp`] to compare.
#[derive(Debug)]
pub struct TimeOrderedUuidGenerator {
    sequence: AtomicU32,
    last_timestamp: Mutex<u64>,
    address: [u8; ADDRESS_LEN],
}

impl TimeOrderedUuidGenerator {
    /// Create a generator with a random starting sequence
    pub fn new() -> Self {
        Self::with_sequence(rand::random::<u32>())
    }

    pub(crate) fn with_sequence(start: u32) -> Self {
        Self {
            sequence: AtomicU32::new(start & SEQUENCE_MASK),
            last_timestamp: Mutex::new(0),
            address: munged_address(),
        }
    }

    /// Generate a new ID. `time_source` should return milliseconds.
    pub fn generate<F>(&self, time_source: F) -> String
    where
        F: Fn() -> u64,
    {
        base64::encode(&self.generate_raw(time_source))
    }

    /// Generate the 15 raw bytes of a new ID
    pub fn generate_raw<F>(&self, time_source: F) -> [u8; RAW_LEN]
    where
        F: Fn() -> u64,
    {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed).wrapping_add(1) & SEQUENCE_MASK;

        let timestamp = {
            let mut last = self.last_timestamp.lock();
            let mut timestamp = (*last).max(time_source());
            if sequence == 0 {
                // Wrapped: step forward so (timestamp, sequence) cannot repeat
                timestamp += 1;
            }
            *last = timestamp;
            timestamp
        };

        let mut bytes = [0u8; RAW_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&timestamp.to_be_bytes()[8 - TIMESTAMP_LEN..]);
        bytes[TIMESTAMP_LEN..TIMESTAMP_LEN + ADDRESS_LEN].copy_from_slice(&self.address);
        bytes[TIMESTAMP_LEN + ADDRESS_LEN..].copy_from_slice(&sequence.to_be_bytes()[1..]);
        bytes
    }
}

impl Default for TimeOrderedUuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a time-ordered ID back to its raw bytes
pub fn decode(encoded: &str) -> Result<[u8; RAW_LEN], DecodeError> {
    if encoded.len() != ENCODED_LEN {
        return Err(DecodeError::InvalidLength(encoded.len()));
    }
    let bytes = base64::decode(encoded)?;
    <[u8; RAW_LEN]>::try_from(bytes.as_slice()).map_err(|_| DecodeError::InvalidLength(encoded.len()))
}

/// Timestamp (milliseconds, as supplied by the time source) of a time-ordered ID
pub fn extract_timestamp(encoded: &str) -> Result<u64, DecodeError> {
    let bytes = decode(encoded)?;
    let mut buf = [0u8; 8];
    buf[8 - TIMESTAMP_LEN..].copy_from_slice(&bytes[..TIMESTAMP_LEN]);
    Ok(u64::from_be_bytes(buf))
}

/// Sequence counter of a time-ordered ID
pub fn extract_sequence(encoded: &str) -> Result<u32, DecodeError> {
    let bytes = decode(encoded)?;
    let mut buf = [0u8; 4];
    buf[1..].copy_from_slice(&bytes[TIMESTAMP_LEN + ADDRESS_LEN..]);
    Ok(u32::from_be_bytes(buf))
}
