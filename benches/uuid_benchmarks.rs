use criterion::{criterion_group, criterion_main, Criterion};
use snowkit::uuid::time_ordered;
use snowkit::{base64, clock, RandomUuidGenerator, TimeOrderedUuidGenerator};
use std::hint::black_box;

pub fn time_ordered_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Time Ordered UUID");
    let generator = TimeOrderedUuidGenerator::new();

    group.bench_function("generate", |b| {
        b.iter(|| black_box(generator.generate(clock::system_millis)));
    });
    group.bench_function("generate_raw", |b| {
        b.iter(|| black_box(generator.generate_raw(clock::system_millis)));
    });

    let id = generator.generate(clock::system_millis);
    group.bench_function("extract_timestamp", |b| {
        b.iter(|| black_box(time_ordered::extract_timestamp(black_box(&id))));
    });

    group.finish();
}

pub fn random_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Random UUID");
    let generator = RandomUuidGenerator::new();

    group.bench_function("compact", |b| {
        b.iter(|| black_box(generator.generate()));
    });
    group.bench_function("hyphenated", |b| {
        b.iter(|| black_box(generator.generate_hyphenated()));
    });

    group.finish();
}

pub fn base64_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Base64");
    let bytes = [0xA5u8; 15];
    let encoded = base64::encode(&bytes);

    group.bench_function("encode_15", |b| {
        b.iter(|| black_box(base64::encode(black_box(&bytes))));
    });
    group.bench_function("decode_20", |b| {
        b.iter(|| black_box(base64::decode(black_box(&encoded))));
    });

    group.finish();
}

criterion_group!(benches, time_ordered_benchmarks, random_benchmarks, base64_benchmarks);
criterion_main!(benches);
