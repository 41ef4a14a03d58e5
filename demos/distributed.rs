use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use snowkit::{clock, GeneratorRegistry};

fn main() {
    // One registry per process, shared by every thread
    let registry = Arc::new(GeneratorRegistry::new());
    let mut handles = vec![];

    // Each thread plays a worker in the same data center
    for worker in 0..4u64 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            let mut ids = HashSet::new();
            for _ in 0..1_000 {
                let id = registry
                    .next_snowflake_id(1, worker, clock::system_millis)
                    .unwrap();
                assert!(ids.insert(id), "Duplicate ID generated!");
            }
            let generator = registry.snowflake(1, worker).unwrap();
            let sample = *ids.iter().next().unwrap();
            println!(
                "Worker {worker} generated {} IDs, e.g. {sample} (workers={:?})",
                ids.len(),
                generator.extract().decompose(sample).worker_ids
            );
            ids
        }));
    }

    let mut all_ids = HashSet::new();
    for handle in handles {
        all_ids.extend(handle.join().unwrap());
    }

    println!("\nTotal unique IDs generated: {}", all_ids.len());
    println!(
        "Distinct generators cached: {}",
        registry.cached_snowflake_count()
    );
}
