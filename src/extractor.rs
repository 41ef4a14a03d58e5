use chrono::{DateTime, Utc};

use crate::config::SnowflakeConfig;
use crate::error::SnowflakeError;

/// Components of a decoded Snowflake ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnowflakeParts {
    /// Timestamp in the layout's unit, epoch added back
    pub timestamp: u64,
    /// Worker IDs in segment order
    pub worker_ids: Vec<u64>,
    pub sequence: u64,
}

/// Snowflake ID component extractor. Pure, needs no locking.
#[derive(Debug, Clone)]
pub struct SnowflakeExtractor {
    config: SnowflakeConfig,
}

impl SnowflakeExtractor {
    /// Create a new extractor for the given layout
    pub fn new(config: SnowflakeConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &SnowflakeConfig {
        &self.config
    }

    /// Timestamp segment as stored, i.e. relative to the epoch
    #[inline(always)]
    pub fn raw_timestamp(&self, id: i64) -> u64 {
        (id as u64) >> self.config.timestamp_shift()
    }

    /// Timestamp in the layout's unit since the Unix epoch
    #[inline(always)]
    pub fn unix_timestamp(&self, id: i64) -> u64 {
        self.raw_timestamp(id).wrapping_add(self.config.epoch())
    }

    /// Instant the ID was generated at, to unit granularity
    pub fn timestamp(&self, id: i64) -> DateTime<Utc> {
        self.config.time_unit().to_datetime(self.unix_timestamp(id))
    }

    /// Extract sequence component
    #[inline(always)]
    pub fn sequence(&self, id: i64) -> u64 {
        (id as u64) & self.config.sequence_mask()
    }

    /// Extract the worker ID of the `index`-th segment (0 is the highest)
    pub fn worker_id(&self, id: i64, index: usize) -> Result<u64, SnowflakeError> {
        let segments = self.config.worker_segments();
        let segment = segments
            .get(index)
            .ok_or(SnowflakeError::SegmentOutOfRange {
                index,
                count: segments.len(),
            })?;
        Ok(((id as u64) >> segment.shift()) & segment.max_worker_id())
    }

    /// Extract the worker ID of the segment with the given name
    pub fn worker_id_by_name(&self, id: i64, name: &str) -> Result<u64, SnowflakeError> {
        let segment = self
            .config
            .worker_segments()
            .iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| SnowflakeError::UnknownSegment {
                name: name.to_string(),
            })?;
        Ok(((id as u64) >> segment.shift()) & segment.max_worker_id())
    }

    /// Decompose an ID into timestamp, worker IDs and sequence in one pass
    pub fn decompose(&self, id: i64) -> SnowflakeParts {
        let raw = id as u64;
        SnowflakeParts {
            timestamp: self.unix_timestamp(id),
            worker_ids: self
                .config
                .worker_segments()
                .iter()
                .map(|s| (raw >> s.shift()) & s.max_worker_id())
                .collect(),
            sequence: raw & self.config.sequence_mask(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimeUnit;

    fn config() -> SnowflakeConfig {
        SnowflakeConfig::builder()
            .worker_segment("rack", 3, 5)
            .worker_segment("host", 7, 100)
            .sequence_bits(10)
            .epoch(1_000)
            .build()
            .unwrap()
    }

    fn create_id(config: &SnowflakeConfig, delta: u64, rack: u64, host: u64, seq: u64) -> i64 {
        ((delta << config.timestamp_shift()) | (rack << 17) | (host << 10) | seq) as i64
    }

    #[test]
    fn test_decompose() {
        let config = config();
        let extract = SnowflakeExtractor::new(config.clone());
        let id = create_id(&config, 0x1234567, 5, 100, 123);

        assert_eq!(extract.raw_timestamp(id), 0x1234567);
        assert_eq!(extract.unix_timestamp(id), 0x1234567 + 1_000);
        assert_eq!(extract.worker_id(id, 0), Ok(5));
        assert_eq!(extract.worker_id(id, 1), Ok(100));
        assert_eq!(extract.worker_id_by_name(id, "host"), Ok(100));
        assert_eq!(extract.sequence(id), 123);

        let parts = extract.decompose(id);
        assert_eq!(parts.timestamp, 0x1234567 + 1_000);
        assert_eq!(parts.worker_ids, vec![5, 100]);
        assert_eq!(parts.sequence, 123);
    }

    #[test]
    fn test_component_boundaries() {
        let config = config();
        let extract = SnowflakeExtractor::new(config.clone());
        let id = create_id(&config, config.max_timestamp_delta(), 7, 127, 1023);

        assert!(id > 0);
        assert_eq!(extract.raw_timestamp(id), config.max_timestamp_delta());
        assert_eq!(extract.worker_id(id, 0), Ok(7));
        assert_eq!(extract.worker_id(id, 1), Ok(127));
        assert_eq!(extract.sequence(id), 1023);
    }

    #[test]
    fn test_unknown_segments() {
        let extract = SnowflakeExtractor::new(config());
        assert_eq!(
            extract.worker_id(0, 2),
            Err(SnowflakeError::SegmentOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(
            extract.worker_id_by_name(0, "zone"),
            Err(SnowflakeError::UnknownSegment {
                name: "zone".to_string()
            })
        );
    }

    #[test]
    fn test_timestamp_in_seconds() {
        let config = SnowflakeConfig::builder()
            .time_unit(TimeUnit::Seconds)
            .worker_segment("host", 8, 1)
            .epoch(1_577_836_800)
            .build()
            .unwrap();
        let extract = SnowflakeExtractor::new(config.clone());
        let id = create_id(&config, 86_400, 0, 0, 0);
        assert_eq!(
            extract.timestamp(id).to_rfc3339(),
            "2020-01-02T00:00:00+00:00"
        );
    }
}
