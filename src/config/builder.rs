//! SnowflakeConfig builder for constructing and validating layouts

use super::{calculate_mask, SnowflakeConfig, WaitConfig, DEFAULT_EPOCH_MILLIS};
use super::{DEFAULT_SEQUENCE_BITS, MAX_LAYOUT_BITS};
use crate::clock::TimeUnit;
use crate::error::SnowflakeError;

/// Builder for SnowflakeConfig
#[derive(Debug, Clone)]
pub struct SnowflakeConfigBuilder {
    time_unit: TimeUnit,
    epoch: Option<u64>,
    segments: Vec<(String, u8, u64)>,
    sequence_bits: u8,
    cache_expiration: u64,
    wait: WaitConfig,
}

impl SnowflakeConfigBuilder {
    /// Create a new builder: milliseconds, default epoch, 12-bit sequence,
    /// no worker segments, buffering disabled
    pub fn new() -> Self {
        Self {
            time_unit: TimeUnit::Milliseconds,
            epoch: None,
            segments: Vec::new(),
            sequence_bits: DEFAULT_SEQUENCE_BITS,
            cache_expiration: 0,
            wait: WaitConfig::default(),
        }
    }

    /// Set the granularity of the timestamp segment
    pub fn time_unit(mut self, unit: TimeUnit) -> Self {
        self.time_unit = unit;
        self
    }

    /// Set a custom epoch, expressed in the configured time unit.
    /// Defaults to [`DEFAULT_EPOCH_MILLIS`] converted to the unit.
    pub fn epoch(mut self, epoch: u64) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Append a worker segment below the ones added so far
    pub fn worker_segment(mut self, name: impl Into<String>, bits: u8, worker_id: u64) -> Self {
        self.segments.push((name.into(), bits, worker_id));
        self
    }

    /// Set the width of the per-timestamp sequence counter
    pub fn sequence_bits(mut self, bits: u8) -> Self {
        self.sequence_bits = bits;
        self
    }

    /// Enable buffered mode with the given staleness window (in the
    /// configured time unit). 0 disables it.
    pub fn cache_expiration(mut self, expiration: u64) -> Self {
        self.cache_expiration = expiration;
        self
    }

    /// Set how generators wait for the time source to advance
    pub fn wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Validate and build the final SnowflakeConfig
    pub fn build(self) -> Result<SnowflakeConfig, SnowflakeError> {
        if !self.time_unit.is_supported() {
            return Err(SnowflakeError::UnsupportedTimeUnit {
                unit: self.time_unit,
            });
        }
        if self.segments.is_empty() {
            return Err(SnowflakeError::EmptyWorkerSegments);
        }

        let total = self
            .segments
            .iter()
            .map(|(_, bits, _)| u32::from(*bits))
            .sum::<u32>()
            + u32::from(self.sequence_bits);
        if total > MAX_LAYOUT_BITS {
            return Err(SnowflakeError::TooManyBits {
                total,
                max: MAX_LAYOUT_BITS,
            });
        }

        for (name, bits, worker_id) in &self.segments {
            let max = calculate_mask(*bits);
            if *worker_id > max {
                return Err(SnowflakeError::InvalidWorkerId {
                    segment: name.clone(),
                    worker_id: *worker_id,
                    max,
                });
            }
        }

        let epoch = self
            .epoch
            .unwrap_or_else(|| self.time_unit.convert_millis(DEFAULT_EPOCH_MILLIS));

        Ok(SnowflakeConfig::from_parts(
            self.time_unit,
            epoch,
            self.segments,
            self.sequence_bits,
            self.cache_expiration,
            self.wait,
        ))
    }
}

impl Default for SnowflakeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
