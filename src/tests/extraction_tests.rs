//! Decoding generated IDs back into their components

use crate::tests::test_utils::StepClock;
use crate::*;

fn layouts() -> Vec<SnowflakeConfig> {
    vec![
        presets::classic_config(17, 29).unwrap(),
        presets::buffered_config(1023, false).unwrap(),
        presets::buffered_config(0, true).unwrap(),
        presets::ipv4_host_config("172.16.254.1".parse().unwrap(), 0).unwrap(),
        SnowflakeConfig::builder()
            .worker_segment("region", 3, 6)
            .worker_segment("zone", 4, 11)
            .worker_segment("host", 9, 300)
            .sequence_bits(8)
            .epoch(1_000_000)
            .build()
            .unwrap(),
    ]
}

#[test]
fn test_roundtrip_all_layouts() {
    for config in layouts() {
        let expected_workers: Vec<u64> = config
            .worker_segments()
            .iter()
            .map(|s| s.worker_id())
            .collect();
        let start = if config.time_unit() == TimeUnit::Seconds {
            1_700_000_000
        } else {
            1_700_000_000_000
        };
        let generator = SnowflakeGenerator::new(config);
        let clock = StepClock::new(start, 3);

        for _ in 0..200 {
            let id = generator.generate(|| clock.tick());
            let parts = generator.extract().decompose(id);
            assert_eq!(parts.worker_ids, expected_workers);
            for (i, worker) in expected_workers.iter().enumerate() {
                assert_eq!(generator.extract().worker_id(id, i), Ok(*worker));
            }
            assert_eq!(parts.sequence, generator.extract().sequence(id));
            assert_eq!(parts.timestamp, generator.extract().unix_timestamp(id));
        }
    }
}

#[test]
fn test_roundtrip_timestamp_and_sequence() {
    let generator = presets::classic(2, 3).unwrap();
    let clock = StepClock::new(1_650_000_000_000, 1);

    // Direct mode: every call reads a new millisecond, sequence stays 0
    let mut expected_ts = 1_650_000_000_000;
    for _ in 0..100 {
        let id = generator.generate(|| clock.tick());
        assert_eq!(generator.extract().unix_timestamp(id), expected_ts);
        assert_eq!(generator.extract().sequence(id), 0);
        assert_eq!(
            generator.extract().timestamp(id).timestamp_millis() as u64,
            expected_ts
        );
        expected_ts += 1;
    }

    for expected_seq in 1..10 {
        let id = generator.generate(|| expected_ts - 1);
        assert_eq!(generator.extract().sequence(id), expected_seq);
        assert_eq!(generator.extract().unix_timestamp(id), expected_ts - 1);
    }
}

#[test]
fn test_timestamp_in_seconds_layout() {
    let generator = presets::ipv4_host("10.1.2.3".parse().unwrap(), 0).unwrap();
    let id = generator.generate(|| 1_700_000_000);
    let instant = generator.extract().timestamp(id);
    assert_eq!(instant.timestamp(), 1_700_000_000);
    assert_eq!(generator.extract().raw_timestamp(id), 1_700_000_000 - 1_577_836_800);
}
