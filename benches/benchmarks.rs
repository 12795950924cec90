//! Benchmarks for wtdstats accumulators
//!
//! Run with: cargo bench

// Require all accumulator families for benchmarks
#[cfg(not(all(feature = "moments", feature = "quantiles", feature = "discrete")))]
compile_error!("Benchmarks require all accumulator families. Run: cargo bench");

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use wtdstats::discrete::DiscreteAccumulator;
use wtdstats::moments::{FeatureSet, MomentAccumulator};
use wtdstats::quantiles::QuantileAccumulator;
use wtdstats::summary::{StatsConfig, Verbosity, WeightedSummary};
use wtdstats::traits::Accumulator;

/// Deterministic particle stream, weights in (0, 1]
fn particles(n: usize) -> (Vec<f64>, Vec<f64>) {
    let values = (0..n).map(|i| ((i * 7919) % 10_007) as f64 / 100.0).collect();
    let weights = (0..n).map(|i| 1.0 / (1 + i % 13) as f64).collect();
    (values, weights)
}

// ============================================================================
// Moment Benchmarks
// ============================================================================

fn bench_moments(c: &mut Criterion) {
    let mut group = c.benchmark_group("moments");
    group.throughput(Throughput::Elements(1));

    for order in 1..=4 {
        group.bench_function(format!("push_order{}", order), |b| {
            let mut acc = MomentAccumulator::with_features(FeatureSet::up_to(order).unwrap());
            let mut i = 0u64;
            b.iter(|| {
                acc.push(black_box(i as f64 * 0.5), black_box(0.25)).unwrap();
                i = i.wrapping_add(1);
            });
        });
    }

    group.bench_function("merge", |b| {
        let (values, weights) = particles(10_000);
        let features = FeatureSet::up_to(4).unwrap();
        let mut left = MomentAccumulator::with_features(features);
        let mut right = MomentAccumulator::with_features(features);
        left.extend_pairs(&values[..5_000], &weights[..5_000]).unwrap();
        right.extend_pairs(&values[5_000..], &weights[5_000..]).unwrap();
        b.iter(|| {
            let mut merged = left.clone();
            merged.merge(black_box(&right)).unwrap();
            black_box(merged.kurtosis().unwrap())
        });
    });

    group.finish();
}

// ============================================================================
// Quantile Benchmarks
// ============================================================================

fn bench_quantiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("quantiles");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push", |b| {
        let mut acc = QuantileAccumulator::new(&[0.5]).unwrap();
        let mut i = 0u64;
        b.iter(|| {
            acc.push(black_box(i as f64), black_box(1.0)).unwrap();
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("query_cached", |b| {
        let (values, weights) = particles(100_000);
        let mut acc = QuantileAccumulator::new(&[0.025, 0.5, 0.975]).unwrap();
        acc.extend_pairs(&values, &weights).unwrap();
        acc.median().unwrap();
        b.iter(|| black_box(acc.quantile_at(black_box(0.9)).unwrap()));
    });

    group.bench_function("sort_and_query_10k", |b| {
        let (values, weights) = particles(10_000);
        let mut acc = QuantileAccumulator::new(&[0.5]).unwrap();
        acc.extend_pairs(&values, &weights).unwrap();
        b.iter(|| {
            let fresh = acc.clone();
            black_box(fresh.median().unwrap())
        });
    });

    group.finish();
}

// ============================================================================
// Discrete Benchmarks
// ============================================================================

fn bench_discrete(c: &mut Criterion) {
    let mut group = c.benchmark_group("discrete");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_100_distinct", |b| {
        let mut acc = DiscreteAccumulator::new();
        let mut i = 0u64;
        b.iter(|| {
            acc.push(black_box((i % 100) as f64), black_box(0.5)).unwrap();
            i = i.wrapping_add(1);
        });
    });

    group.bench_function("mode", |b| {
        let (values, weights) = particles(50_000);
        let rounded: Vec<f64> = values.iter().map(|v| v.round()).collect();
        let mut acc = DiscreteAccumulator::new();
        acc.extend_pairs(&rounded, &weights).unwrap();
        b.iter(|| black_box(acc.mode().unwrap()));
    });

    group.finish();
}

// ============================================================================
// Summary Benchmarks
// ============================================================================

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");
    let (values, weights) = particles(10_000);
    group.throughput(Throughput::Elements(values.len() as u64));

    let summary = WeightedSummary::new(StatsConfig::default().with_verbosity(Verbosity::Quiet));

    group.bench_function("stat_order4", |b| {
        b.iter(|| black_box(summary.stat(&values, &weights, 4).unwrap()));
    });

    group.bench_function("quantile_ci", |b| {
        b.iter(|| black_box(summary.quantile(&values, &weights, &[0.025, 0.5, 0.975]).unwrap()));
    });

    group.bench_function("table", |b| {
        b.iter(|| black_box(summary.table(&values, &weights).unwrap()));
    });

    group.finish();
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_moments,
    bench_quantiles,
    bench_discrete,
    bench_summary,
);

criterion_main!(benches);
