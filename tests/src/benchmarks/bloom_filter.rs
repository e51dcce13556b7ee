//! # Bloom Filter Benchmarks
//!
//! - Batch insert at several capacities
//! - Membership checks, single and batched
//! - Export and restore of the transport record

use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use psi_bloom_filter::BloomFilter;

fn elements(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("Element {i}").into_bytes())
        .collect()
}

pub fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter-insert");

    for size in [1_000usize, 10_000, 100_000] {
        let batch = elements(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build_from", size), &batch, |b, batch| {
            b.iter(|| black_box(BloomFilter::build_from(batch, 0.001)))
        });
    }

    group.finish();
}

pub fn bench_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter-check");
    let batch = elements(10_000);
    let filter = match BloomFilter::build_from(&batch, 0.001) {
        Ok(filter) => filter,
        Err(err) => panic!("benchmark filter: {err}"),
    };
    let probes = elements(20_000);

    group.bench_function("check_single", |b| {
        b.iter(|| black_box(filter.check(black_box(b"Element 42"))))
    });

    group.throughput(Throughput::Elements(probes.len() as u64));
    group.bench_function("check_batch_20k", |b| {
        b.iter(|| black_box(filter.check_batch(&probes)))
    });

    group.finish();
}

pub fn bench_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter-record");
    let filter = match BloomFilter::build_from(&elements(10_000), 0.001) {
        Ok(filter) => filter,
        Err(err) => panic!("benchmark filter: {err}"),
    };
    let json = match filter.export().to_json() {
        Ok(json) => json,
        Err(err) => panic!("benchmark record: {err}"),
    };

    group.bench_function("export_json", |b| {
        b.iter(|| black_box(filter.export().to_json()))
    });
    group.bench_function("restore_json", |b| {
        b.iter(|| {
            let record = psi_bloom_filter::BloomFilterRecord::from_json(black_box(&json));
            black_box(record.and_then(|r| BloomFilter::from_record(&r)))
        })
    });

    group.finish();
}
