//! Criterion benchmarks for raw draw and sampler throughput.
//!
//! Run with: cargo bench
//! Run specific group: cargo bench -- raw_draws
//! Run specific generator: cargo bench -- mt19937

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bitgen::{BitGenerator, LegacySampler, Mt19937, ThreeFry32, Xoshiro256StarStar};

const DRAWS: usize = 1000;

fn bench_raw_draws(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_draws");

    group.bench_function(BenchmarkId::new("mt19937", "next_u64"), |b| {
        let mut gen = Mt19937::new(42).unwrap();
        b.iter(|| {
            let mut acc = 0u64;
            for _ in 0..DRAWS {
                acc = acc.wrapping_add(gen.next_u64());
            }
            black_box(acc)
        })
    });

    group.bench_function(BenchmarkId::new("threefry32", "next_u64"), |b| {
        let mut gen = ThreeFry32::new(42);
        b.iter(|| {
            let mut acc = 0u64;
            for _ in 0..DRAWS {
                acc = acc.wrapping_add(gen.next_u64());
            }
            black_box(acc)
        })
    });

    group.bench_function(BenchmarkId::new("xoshiro256starstar", "next_u64"), |b| {
        let mut gen = Xoshiro256StarStar::new(42);
        b.iter(|| {
            let mut acc = 0u64;
            for _ in 0..DRAWS {
                acc = acc.wrapping_add(gen.next_u64());
            }
            black_box(acc)
        })
    });

    group.finish();
}

fn bench_doubles(c: &mut Criterion) {
    let mut group = c.benchmark_group("doubles");

    group.bench_function(BenchmarkId::new("mt19937", "next_double"), |b| {
        let mut gen = Mt19937::new(42).unwrap();
        b.iter(|| {
            let mut acc = 0.0f64;
            for _ in 0..DRAWS {
                acc += gen.next_double();
            }
            black_box(acc)
        })
    });

    group.bench_function(BenchmarkId::new("xoshiro256starstar", "next_double"), |b| {
        let mut gen = Xoshiro256StarStar::new(42);
        b.iter(|| {
            let mut acc = 0.0f64;
            for _ in 0..DRAWS {
                acc += gen.next_double();
            }
            black_box(acc)
        })
    });

    group.finish();
}

fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("legacy_sampler");

    group.bench_function("gauss", |b| {
        let mut gen = Xoshiro256StarStar::new(42);
        let mut sampler = LegacySampler::new();
        b.iter(|| {
            let mut acc = 0.0f64;
            for _ in 0..DRAWS {
                acc += sampler.gauss(&mut gen);
            }
            black_box(acc)
        })
    });

    group.bench_function("standard_gamma_3.5", |b| {
        let mut gen = Xoshiro256StarStar::new(42);
        let mut sampler = LegacySampler::new();
        b.iter(|| {
            let mut acc = 0.0f64;
            for _ in 0..DRAWS {
                acc += sampler.standard_gamma(&mut gen, 3.5);
            }
            black_box(acc)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_raw_draws, bench_doubles, bench_sampler);
criterion_main!(benches);
