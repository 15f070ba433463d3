//! Benchmark for FrozenHashSet vs standard HashSet.
//!
//! Compares the build and lookup performance of congeal's FrozenHashSet
//! against Rust's standard HashSet for common operations.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use congeal::frozen::FrozenHashSet;
use std::collections::HashSet;
use std::hint::black_box;

// =============================================================================
// build Benchmark
// =============================================================================

fn benchmark_build(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("build");

    for size in [1_000, 10_000, 100_000] {
        // FrozenHashSet build through the builder
        group.bench_with_input(
            BenchmarkId::new("FrozenHashSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut builder = FrozenHashSet::with_capacity_builder(size);
                    for index in 0..size {
                        builder.add(black_box(index));
                    }
                    black_box(builder.build())
                });
            },
        );

        // Standard HashSet insert
        group.bench_with_input(
            BenchmarkId::new("HashSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = HashSet::with_capacity(size);
                    for index in 0..size {
                        set.insert(black_box(index));
                    }
                    black_box(set)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in [1_000, 10_000, 100_000] {
        let frozen: FrozenHashSet<usize> = (0..size).collect();
        let standard: HashSet<usize> = (0..size).collect();

        // Alternate present and absent probes.
        group.bench_with_input(
            BenchmarkId::new("FrozenHashSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut hits = 0usize;
                    for probe in 0..size * 2 {
                        if frozen.contains(black_box(&probe)) {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("HashSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut hits = 0usize;
                    for probe in 0..size * 2 {
                        if standard.contains(black_box(&probe)) {
                            hits += 1;
                        }
                    }
                    black_box(hits)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// iterate Benchmark
// =============================================================================

fn benchmark_iterate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iterate");

    for size in [1_000, 10_000, 100_000] {
        let frozen: FrozenHashSet<usize> = (0..size).collect();
        let standard: HashSet<usize> = (0..size).collect();

        group.bench_with_input(
            BenchmarkId::new("FrozenHashSet", size),
            &size,
            |bencher, _| {
                bencher.iter(|| {
                    let sum: usize = frozen.iter().sum();
                    black_box(sum)
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("HashSet", size), &size, |bencher, _| {
            bencher.iter(|| {
                let sum: usize = standard.iter().sum();
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_build,
    benchmark_contains,
    benchmark_iterate
);
criterion_main!(benches);
