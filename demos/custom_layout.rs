use snowkit::{clock, SnowflakeConfig, SnowflakeGenerator, TimeUnit};

fn main() {
    // 3-bit region, 5-bit rack, 8-bit host, 10-bit sequence, seconds since 2024
    let config = SnowflakeConfig::builder()
        .time_unit(TimeUnit::Seconds)
        .epoch(1_704_067_200)
        .worker_segment("region", 3, 5)
        .worker_segment("rack", 5, 17)
        .worker_segment("host", 8, 201)
        .sequence_bits(10)
        .build()
        .unwrap();

    println!("Generator layout:");
    for segment in config.worker_segments() {
        println!(
            "  {:<8} bits={:<2} shift={:<2} id={} (max {})",
            segment.name(),
            segment.bits(),
            segment.shift(),
            segment.worker_id(),
            segment.max_worker_id()
        );
    }
    println!("  Sequence bits: {}", config.sequence_bits());
    println!("  Timestamp bits: {}", config.timestamp_bits());

    let generator = SnowflakeGenerator::new(config);
    let id = generator.generate(clock::system_seconds);

    println!("\nGenerated ID: {id}");
    println!("  Time: {}", generator.extract().timestamp(id));
    for name in ["region", "rack", "host"] {
        println!(
            "  {name}: {}",
            generator.extract().worker_id_by_name(id, name).unwrap()
        );
    }
    println!("  Sequence: {}", generator.extract().sequence(id));
    println!("  Usable until: {}", generator.latest_usable_instant());
}
