//! Benchmarks for the streaming and histogram estimators

use asm_stats::batch;
use asm_stats::{HistogramStats, OnlineStats};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

fn bench_online(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let normal = Normal::new(5_000.0, 800.0).unwrap();
    let values: Vec<f64> = (0..100_000).map(|_| normal.sample(&mut rng)).collect();

    let mut group = c.benchmark_group("online");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("insert_100k", |b| {
        b.iter(|| {
            let mut stats = OnlineStats::new();
            for &v in &values {
                stats.insert(black_box(v));
            }
            black_box(stats.stddev())
        })
    });

    group.finish();
}

fn bench_histogram(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<u64> = (0..100_000).map(|_| rng.gen_range(0..10_000)).collect();

    let mut group = c.benchmark_group("histogram");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("add_100k", |b| {
        b.iter(|| {
            let mut hist = HistogramStats::with_capacity(16_384);
            for &v in &values {
                hist.add(black_box(v));
            }
            hist
        })
    });

    group.bench_function("finalize_10k_buckets", |b| {
        let mut hist = HistogramStats::with_capacity(16_384);
        for &v in &values {
            hist.add(v);
        }
        b.iter(|| {
            // Invalidate the cache so every iteration pays the recompute.
            hist.add(0);
            black_box(hist.mad())
        })
    });

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let values: Vec<i64> = (0..100_000).map(|_| rng.gen_range(0..10_000)).collect();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(values.len() as u64));

    group.bench_function("filtered_mean_stddev_100k", |b| {
        b.iter_batched(
            || values.clone(),
            |mut dist| black_box(batch::filtered_mean_stddev(&mut dist, false)),
            criterion::BatchSize::LargeInput,
        )
    });

    group.bench_function("median_absolute_deviation_100k", |b| {
        b.iter_batched(
            || values.clone(),
            |mut dist| black_box(batch::median_absolute_deviation(&mut dist, false)),
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_online, bench_histogram, bench_batch);
criterion_main!(benches);
