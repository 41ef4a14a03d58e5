//! Fixed layouts built on [`SnowflakeGenerator`]
//!
//! - [`classic`]: 5-bit data center, 5-bit worker, 12-bit sequence, milliseconds
//! - [`buffered`]: 10-bit worker, 12-bit sequence, milliseconds, optional
//!   10 minute buffering window
//! - [`ipv4_host`]: third and fourth IPv4 octets, 16-bit sequence, seconds

use std::net::Ipv4Addr;

use crate::clock::TimeUnit;
use crate::config::SnowflakeConfig;
use crate::error::SnowflakeError;
use crate::generator::SnowflakeGenerator;

pub const CLASSIC_DATA_CENTER_BITS: u8 = 5;
pub const CLASSIC_WORKER_BITS: u8 = 5;
pub const CLASSIC_SEQUENCE_BITS: u8 = 12;

pub const BUFFERED_WORKER_BITS: u8 = 10;
pub const BUFFERED_SEQUENCE_BITS: u8 = 12;
/// Staleness window of the buffered preset: 10 minutes in milliseconds
pub const BUFFERED_CACHE_EXPIRATION_MILLIS: u64 = 10 * 60 * 1000;

pub const IPV4_SEGMENT_BITS: u8 = 8;
pub const IPV4_SEQUENCE_BITS: u8 = 16;

/// Layout of the classic data center + worker generator
pub fn classic_config(data_center_id: u64, worker_id: u64) -> Result<SnowflakeConfig, SnowflakeError> {
    SnowflakeConfig::builder()
        .worker_segment("data_center", CLASSIC_DATA_CENTER_BITS, data_center_id)
        .worker_segment("worker", CLASSIC_WORKER_BITS, worker_id)
        .sequence_bits(CLASSIC_SEQUENCE_BITS)
        .build()
}

/// Classic Twitter-style generator. Both IDs must be in `0..=31`.
pub fn classic(data_center_id: u64, worker_id: u64) -> Result<SnowflakeGenerator, SnowflakeError> {
    Ok(SnowflakeGenerator::new(classic_config(data_center_id, worker_id)?))
}

/// Layout of the single-segment generator
pub fn buffered_config(worker_id: u64, use_buffering: bool) -> Result<SnowflakeConfig, SnowflakeError> {
    let expiration = if use_buffering {
        BUFFERED_CACHE_EXPIRATION_MILLIS
    } else {
        0
    };
    SnowflakeConfig::builder()
        .worker_segment("worker", BUFFERED_WORKER_BITS, worker_id)
        .sequence_bits(BUFFERED_SEQUENCE_BITS)
        .cache_expiration(expiration)
        .build()
}

/// Single-segment generator, `worker_id` in `0..=1023`. With
/// `use_buffering` the clock is only read when the sequence wraps or the
/// buffering window expires.
pub fn buffered(worker_id: u64, use_buffering: bool) -> Result<SnowflakeGenerator, SnowflakeError> {
    Ok(SnowflakeGenerator::new(buffered_config(worker_id, use_buffering)?))
}

/// Layout derived from the host's IPv4 address
pub fn ipv4_host_config(
    address: Ipv4Addr,
    cache_expiration_secs: u64,
) -> Result<SnowflakeConfig, SnowflakeError> {
    let [_, _, subnet, host] = address.octets();
    SnowflakeConfig::builder()
        .time_unit(TimeUnit::Seconds)
        .worker_segment("subnet", IPV4_SEGMENT_BITS, u64::from(subnet))
        .worker_segment("host", IPV4_SEGMENT_BITS, u64::from(host))
        .sequence_bits(IPV4_SEQUENCE_BITS)
        .cache_expiration(cache_expiration_secs)
        .build()
}

/// Generator whose worker segments are the third and fourth octets of
/// `address`. Its time source must yield seconds, not milliseconds; the
/// generator cannot detect the mix-up.
pub fn ipv4_host(
    address: Ipv4Addr,
    cache_expiration_secs: u64,
) -> Result<SnowflakeGenerator, SnowflakeError> {
    Ok(SnowflakeGenerator::new(ipv4_host_config(
        address,
        cache_expiration_secs,
    )?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout() {
        let config = classic_config(31, 31).unwrap();
        assert_eq!(config.timestamp_shift(), 22);
        assert_eq!(config.time_unit(), TimeUnit::Milliseconds);
        assert!(!config.is_buffered());
    }

    #[test]
    fn test_classic_rejects_wide_ids() {
        assert!(matches!(
            classic(32, 0),
            Err(SnowflakeError::InvalidWorkerId { max: 31, .. })
        ));
        assert!(classic(0, 32).is_err());
    }

    #[test]
    fn test_buffered_layout() {
        let config = buffered_config(1023, true).unwrap();
        assert_eq!(config.timestamp_shift(), 22);
        assert_eq!(config.cache_expiration(), 600_000);
        assert!(!buffered_config(1, false).unwrap().is_buffered());
        assert!(buffered(1024, false).is_err());
    }

    #[test]
    fn test_ipv4_layout() {
        let config = ipv4_host_config(Ipv4Addr::new(192, 168, 3, 77), 30).unwrap();
        let ids: Vec<u64> = config
            .worker_segments()
            .iter()
            .map(|s| s.worker_id())
            .collect();
        assert_eq!(ids, vec![3, 77]);
        assert_eq!(config.time_unit(), TimeUnit::Seconds);
        assert_eq!(config.epoch(), 1_577_836_800);
        assert_eq!(config.timestamp_shift(), 32);
        assert_eq!(config.cache_expiration(), 30);
    }
}
