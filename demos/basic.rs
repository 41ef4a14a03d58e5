use snowkit::uuid::time_ordered;
use snowkit::{clock, presets, RandomUuidGenerator, TimeOrderedUuidGenerator};

fn main() {
    // Data center 1, worker 2
    let generator = presets::classic(1, 2).unwrap();

    let id1 = generator.generate(clock::system_millis);
    let id2 = generator.generate(clock::system_millis);
    let id3 = generator.generate(clock::system_millis);

    println!("Generated IDs (guaranteed to be monotonic):");
    for id in [id1, id2, id3] {
        let parts = generator.extract().decompose(id);
        println!(
            "  ID: {id}, Human date: {}, Workers: {:?}, Sequence: {}",
            generator.extract().timestamp(id),
            parts.worker_ids,
            parts.sequence
        );
    }

    println!(
        "\nThis layout can encode timestamps until {}",
        generator.latest_usable_instant()
    );

    let time_ordered = TimeOrderedUuidGenerator::new();
    let uuid = time_ordered.generate(clock::system_millis);
    println!("\nTime-ordered UUID: {uuid}");
    println!(
        "  Timestamp: {} ms",
        time_ordered::extract_timestamp(&uuid).unwrap()
    );

    let random = RandomUuidGenerator::new();
    println!("\nRandom UUID: {}", random.generate_hyphenated());
    println!("Random UUID (compact): {}", random.generate());
}
