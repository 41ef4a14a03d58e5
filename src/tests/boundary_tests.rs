//! Construction validation at the edges of the bit budget

use crate::*;

#[test]
fn test_max_worker_id_fits() {
    for bits in [1u8, 5, 10, 16, 31] {
        let max = (1u64 << bits) - 1;
        let config = SnowflakeConfig::builder()
            .worker_segment("worker", bits, max)
            .sequence_bits(12)
            .build()
            .unwrap();
        assert_eq!(config.worker_segments()[0].max_worker_id(), max);
    }
}

#[test]
fn test_worker_id_too_large() {
    for bits in [1u8, 5, 10, 16, 31] {
        let err = SnowflakeConfig::builder()
            .worker_segment("worker", bits, 1u64 << bits)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SnowflakeError::InvalidWorkerId {
                segment: "worker".to_string(),
                worker_id: 1u64 << bits,
                max: (1u64 << bits) - 1,
            }
        );
    }
}

#[test]
fn test_second_segment_validated() {
    let err = SnowflakeConfig::builder()
        .worker_segment("data_center", 5, 31)
        .worker_segment("worker", 5, 40)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        SnowflakeError::InvalidWorkerId { ref segment, worker_id: 40, max: 31 } if segment == "worker"
    ));
}

#[test]
fn test_zero_width_segment() {
    assert!(SnowflakeConfig::builder()
        .worker_segment("unused", 0, 0)
        .build()
        .is_ok());
    assert!(SnowflakeConfig::builder()
        .worker_segment("unused", 0, 1)
        .build()
        .is_err());
}

#[test]
fn test_exactly_62_bits() {
    let config = SnowflakeConfig::builder()
        .worker_segment("a", 25, (1 << 25) - 1)
        .worker_segment("b", 25, 0)
        .sequence_bits(12)
        .build()
        .unwrap();
    assert_eq!(config.timestamp_shift(), 62);
    assert_eq!(config.timestamp_bits(), 2);
    assert_eq!(config.max_timestamp_delta(), 1);
}

#[test]
fn test_63_bits_rejected() {
    let err = SnowflakeConfig::builder()
        .worker_segment("a", 25, 0)
        .worker_segment("b", 26, 0)
        .sequence_bits(12)
        .build()
        .unwrap_err();
    assert_eq!(err, SnowflakeError::TooManyBits { total: 63, max: 62 });
}

#[test]
fn test_oversized_segment_does_not_overflow() {
    let err = SnowflakeConfig::builder()
        .worker_segment("huge", 255, u64::MAX)
        .sequence_bits(255)
        .build()
        .unwrap_err();
    assert_eq!(err, SnowflakeError::TooManyBits { total: 510, max: 62 });
}
