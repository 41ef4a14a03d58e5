//! Layout configuration for Snowflake generators
//!
//! A layout is the time unit and epoch of the timestamp segment, an ordered
//! list of worker segments, and the width of the sequence segment. The
//! first worker segment sits directly below the timestamp, the last one
//! directly above the sequence:
//!
//! ```text
//! | timestamp - epoch | worker[0] | worker[1] | ... | sequence |
//! ```

mod builder;
mod wait;

pub use builder::SnowflakeConfigBuilder;
pub use wait::{WaitConfig, WaitConfigBuilder};

use crate::clock::TimeUnit;

/// 2020-01-01T00:00:00Z in milliseconds since the Unix epoch
pub const DEFAULT_EPOCH_MILLIS: u64 = 1_577_836_800_000;
/// Default width of the per-timestamp counter
pub const DEFAULT_SEQUENCE_BITS: u8 = 12;
/// Worker and sequence segments together may not exceed this, keeping the
/// sign bit clear plus one bit of headroom
pub const MAX_LAYOUT_BITS: u32 = 62;

/// A worker segment with its precomputed position in the ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSegment {
    name: String,
    bits: u8,
    worker_id: u64,
    shift: u8,
}

impl WorkerSegment {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    #[inline]
    pub const fn worker_id(&self) -> u64 {
        self.worker_id
    }

    /// Bit offset of the segment's least significant bit
    #[inline]
    pub const fn shift(&self) -> u8 {
        self.shift
    }

    /// Largest worker ID the segment can hold
    #[inline]
    pub const fn max_worker_id(&self) -> u64 {
        calculate_mask(self.bits)
    }

    /// The worker ID shifted into place
    #[inline]
    pub const fn value(&self) -> u64 {
        self.worker_id << self.shift
    }
}

/// Immutable, validated Snowflake layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowflakeConfig {
    time_unit: TimeUnit,
    epoch: u64,
    segments: Vec<WorkerSegment>,
    sequence_bits: u8,
    cache_expiration: u64,
    wait: WaitConfig,
    timestamp_shift: u8,
    sequence_mask: u64,
    worker_prefix: u64,
}

impl SnowflakeConfig {
    /// Create a new configuration builder
    pub fn builder() -> SnowflakeConfigBuilder {
        SnowflakeConfigBuilder::new()
    }

    /// Assemble a config from already validated parts
    pub(crate) fn from_parts(
        time_unit: TimeUnit,
        epoch: u64,
        layout: Vec<(String, u8, u64)>,
        sequence_bits: u8,
        cache_expiration: u64,
        wait: WaitConfig,
    ) -> Self {
        let mut shift = sequence_bits;
        let mut segments = Vec::with_capacity(layout.len());
        // Walk from the sequence end upwards so the first segment ends up highest
        for (name, bits, worker_id) in layout.into_iter().rev() {
            segments.push(WorkerSegment {
                name,
                bits,
                worker_id,
                shift,
            });
            shift += bits;
        }
        segments.reverse();

        let worker_prefix = segments.iter().fold(0, |acc, s| acc | s.value());

        Self {
            time_unit,
            epoch,
            segments,
            sequence_bits,
            cache_expiration,
            wait,
            timestamp_shift: shift,
            sequence_mask: calculate_mask(sequence_bits),
            worker_prefix,
        }
    }

    #[inline(always)]
    pub const fn time_unit(&self) -> TimeUnit {
        self.time_unit
    }

    /// Epoch in the configured time unit
    #[inline(always)]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[inline(always)]
    pub fn worker_segments(&self) -> &[WorkerSegment] {
        &self.segments
    }

    #[inline(always)]
    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    #[inline(always)]
    pub const fn max_sequence(&self) -> u64 {
        self.sequence_mask
    }

    /// Staleness window of buffered mode in the configured unit; 0 when disabled
    #[inline(always)]
    pub const fn cache_expiration(&self) -> u64 {
        self.cache_expiration
    }

    #[inline(always)]
    pub const fn is_buffered(&self) -> bool {
        self.cache_expiration > 0
    }

    #[inline(always)]
    pub const fn wait(&self) -> &WaitConfig {
        &self.wait
    }

    /// Sum of all worker bits plus the sequence bits
    #[inline(always)]
    pub const fn timestamp_shift(&self) -> u8 {
        self.timestamp_shift
    }

    #[inline(always)]
    pub const fn timestamp_bits(&self) -> u8 {
        64 - self.timestamp_shift
    }

    /// Largest timestamp delta that still yields a non-negative ID.
    /// The unsigned segment holds up to `2^timestamp_bits - 1`.
    #[inline(always)]
    pub const fn max_timestamp_delta(&self) -> u64 {
        calculate_mask(self.timestamp_bits() - 1)
    }

    #[inline(always)]
    pub(crate) const fn sequence_mask(&self) -> u64 {
        self.sequence_mask
    }

    /// OR of all shifted worker segment values
    #[inline(always)]
    pub(crate) const fn worker_prefix(&self) -> u64 {
        self.worker_prefix
    }
}

/// Calculate mask for given number of bits
#[inline]
pub(crate) const fn calculate_mask(bits: u8) -> u64 {
    match 1u64.checked_shl(bits as u32) {
        Some(bound) => bound - 1,
        None => u64::MAX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_mask() {
        assert_eq!(calculate_mask(0), 0);
        assert_eq!(calculate_mask(5), 31);
        assert_eq!(calculate_mask(12), 0xFFF);
        assert_eq!(calculate_mask(63), u64::MAX >> 1);
        assert_eq!(calculate_mask(64), u64::MAX);
    }

    #[test]
    fn test_segment_positions() {
        let config = SnowflakeConfig::builder()
            .worker_segment("data_center", 5, 3)
            .worker_segment("worker", 5, 7)
            .sequence_bits(12)
            .build()
            .unwrap();

        let segments = config.worker_segments();
        assert_eq!(segments[0].name(), "data_center");
        assert_eq!(segments[0].shift(), 17);
        assert_eq!(segments[1].name(), "worker");
        assert_eq!(segments[1].shift(), 12);
        assert_eq!(config.timestamp_shift(), 22);
        assert_eq!(config.timestamp_bits(), 42);
        assert_eq!(config.max_sequence(), 0xFFF);
        assert_eq!(config.worker_prefix(), (3 << 17) | (7 << 12));
    }

    #[test]
    fn test_max_timestamp_delta_keeps_sign_bit_clear() {
        let config = SnowflakeConfig::builder()
            .worker_segment("worker", 10, 1)
            .build()
            .unwrap();
        let top = config.max_timestamp_delta() << config.timestamp_shift();
        assert!(top as i64 > 0);
        let past = (config.max_timestamp_delta() + 1) << config.timestamp_shift();
        assert!((past as i64) < 0);
    }
}
