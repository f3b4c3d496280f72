//! Benchmark WoE fitting and transform across dataset sizes and cardinalities
//!
//! Run with: cargo bench --bench encoder_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polars::prelude::*;
use rand::prelude::*;
use rand::SeedableRng;

use woe_encoder::pipeline::{WoeEncoder, WoeEncoderConfig};

/// Generate synthetic categorical data with a label that depends on the category
fn generate_test_dataframe(n_rows: usize, n_features: usize, cardinality: usize, seed: u64) -> DataFrame {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    let codes: Vec<Vec<usize>> = (0..n_features)
        .map(|_| (0..n_rows).map(|_| rng.gen_range(0..cardinality)).collect())
        .collect();

    // Higher category codes of the first feature default more often
    let label: Vec<i32> = (0..n_rows)
        .map(|idx| {
            let risk = 0.1 + 0.6 * codes[0][idx] as f64 / cardinality as f64;
            if rng.gen::<f64>() < risk { 1 } else { 0 }
        })
        .collect();

    let mut columns: Vec<Column> = vec![Column::new("label".into(), label)];
    for (i, feature) in codes.iter().enumerate() {
        let values: Vec<String> = feature.iter().map(|c| format!("cat_{}", c)).collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).expect("Failed to create DataFrame")
}

fn encoder(n_features: usize) -> WoeEncoder {
    WoeEncoder::new(WoeEncoderConfig::new(
        (0..n_features).map(|i| format!("feature_{}", i)).collect(),
        "label",
        "woe",
    ))
}

/// Benchmark fit for varying row counts
fn benchmark_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    group.sample_size(20);

    for n_rows in [10_000, 100_000] {
        let df = generate_test_dataframe(n_rows, 8, 50, 42);
        let enc = encoder(8);

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", n_rows), &df, |b, df| {
            b.iter(|| enc.fit(black_box(df)).expect("fit failed"))
        });
    }

    group.finish();
}

/// Benchmark transform for varying cardinalities
fn benchmark_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.sample_size(20);

    for cardinality in [10, 1_000] {
        let df = generate_test_dataframe(100_000, 8, cardinality, 7);
        let model = encoder(8).fit(&df).expect("fit failed");
        let scoring = df.drop("label").expect("drop failed");

        group.throughput(Throughput::Elements(scoring.height() as u64));
        group.bench_with_input(
            BenchmarkId::new("cardinality", cardinality),
            &scoring,
            |b, scoring| b.iter(|| model.transform(black_box(scoring)).expect("transform failed")),
        );
    }

    group.finish();
}

criterion_group!(benches, benchmark_fit, benchmark_transform);
criterion_main!(benches);
