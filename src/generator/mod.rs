//! General segmented Snowflake generator
//!
//! Split into modules for testability:
//! - `state` - Mutable timestamp/sequence state guarded by the mutex
//! - `wait` - Spin and backoff strategies
//! - `generate` - ID generation logic for direct and buffered mode

mod generate;
mod state;
pub(crate) mod wait;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::debug;

use crate::config::{SnowflakeConfig, SnowflakeConfigBuilder, WaitConfig};
use crate::error::SnowflakeError;
use crate::extractor::SnowflakeExtractor;

use state::State;

/// Snowflake generator for an arbitrary worker segment layout.
///
/// Callers supply the current time on every [`generate`](Self::generate)
/// call, so one generator works with any clock (wall clock, NTP-synced,
/// a cluster time service or a test double).
#[derive(Debug)]
pub struct SnowflakeGenerator {
    // === Hot path fields ===
    state: Mutex<State>,
    worker_prefix: u64,
    sequence_mask: u64,
    ts_shift: u8,
    epoch: u64,
    cache_expiration: u64,
    wait: WaitConfig,

    // === Cold path fields ===
    extract: SnowflakeExtractor,
}

impl SnowflakeGenerator {
    /// Create a generator from a validated layout
    pub fn new(config: SnowflakeConfig) -> Self {
        debug!(
            time_unit = ?config.time_unit(),
            epoch = config.epoch(),
            segments = config.worker_segments().len(),
            sequence_bits = config.sequence_bits(),
            cache_expiration = config.cache_expiration(),
            "creating snowflake generator"
        );

        let state = if config.is_buffered() {
            State::buffered(config.sequence_mask())
        } else {
            State::direct()
        };

        Self {
            state: Mutex::new(state),
            worker_prefix: config.worker_prefix(),
            sequence_mask: config.sequence_mask(),
            ts_shift: config.timestamp_shift(),
            epoch: config.epoch(),
            cache_expiration: config.cache_expiration(),
            wait: *config.wait(),
            extract: SnowflakeExtractor::new(config),
        }
    }

    /// Validate a builder's layout and create a generator from it
    pub fn from_builder(builder: SnowflakeConfigBuilder) -> Result<Self, SnowflakeError> {
        Ok(Self::new(builder.build()?))
    }

    #[inline]
    pub fn config(&self) -> &SnowflakeConfig {
        self.extract.config()
    }

    /// Decoder for IDs produced by this generator's layout
    #[inline]
    pub fn extract(&self) -> &SnowflakeExtractor {
        &self.extract
    }

    /// Worker IDs in segment order
    pub fn worker_ids(&self) -> Vec<u64> {
        self.config()
            .worker_segments()
            .iter()
            .map(|s| s.worker_id())
            .collect()
    }

    /// The last instant at which IDs stay non-negative `i64` values.
    ///
    /// The timestamp segment itself is unsigned and runs out one bit later,
    /// at `epoch + 2^timestamp_bits - 1`; IDs between the two limits are
    /// negative but still decode through [`SnowflakeExtractor`]. Past the
    /// unsigned limit the timestamp wraps and IDs are silently wrong.
    pub fn latest_usable_instant(&self) -> DateTime<Utc> {
        let config = self.config();
        let latest = config.epoch().saturating_add(config.max_timestamp_delta());
        config.time_unit().to_datetime(latest)
    }

    #[inline(always)]
    pub(crate) fn assemble_id(&self, timestamp: u64, sequence: u64) -> i64 {
        let delta = timestamp.wrapping_sub(self.epoch);
        ((delta << self.ts_shift) | self.worker_prefix | sequence) as i64
    }
}
