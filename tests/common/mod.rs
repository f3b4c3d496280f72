//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Small credit-style dataset with known category/label relationships
///
/// This DataFrame includes:
/// - `default`: Binary label column (0/1)
/// - `region`: String categories, `north` mostly positive, `south` mostly negative
/// - `grade`: Integer categories
/// - `score_band`: Float categories
/// - `owner`: Boolean categories
/// - `employer`: String categories with nulls
pub fn create_credit_dataframe() -> DataFrame {
    df! {
        "default" => [1i32, 1, 1, 0, 0, 0, 0, 1, 0, 0],
        "region" => ["north", "north", "north", "north", "south", "south", "south", "east", "east", "south"],
        "grade" => [1i64, 1, 2, 2, 3, 3, 3, 1, 2, 3],
        "score_band" => [0.5f64, 0.5, 0.5, 1.5, 1.5, 2.5, 2.5, 0.5, 1.5, 2.5],
        "owner" => [false, false, true, true, true, true, false, false, true, true],
        "employer" => [Some("acme"), None, Some("acme"), Some("globex"), None, Some("globex"), Some("globex"), None, Some("acme"), Some("globex")],
    }
    .unwrap()
}

/// Scoring data with one category never seen in `create_credit_dataframe`
pub fn create_scoring_dataframe() -> DataFrame {
    df! {
        "region" => ["north", "west", "south"],
        "grade" => [1i64, 4, 3],
        "score_band" => [0.5f64, 1.5, 9.5],
        "owner" => [true, false, true],
        "employer" => [None, Some("initech"), Some("acme")],
    }
    .unwrap()
}

/// Larger random dataset for stress tests
pub fn create_large_categorical_dataframe(rows: usize, cols: usize, cardinality: usize) -> DataFrame {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    let mut rng = StdRng::seed_from_u64(42);

    let mut columns: Vec<Column> = Vec::with_capacity(cols + 1);

    let label: Vec<i32> = (0..rows).map(|_| rng.gen_range(0..2)).collect();
    columns.push(Column::new("label".into(), label));

    for i in 0..cols {
        let values: Vec<String> = (0..rows)
            .map(|_| format!("cat_{}", rng.gen_range(0..cardinality)))
            .collect();
        columns.push(Column::new(format!("feature_{}", i).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Collect a Float64 column as options
pub fn f64_values(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    df.column(column)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Assert two floats are within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} to be within {} of {}",
        actual,
        tol,
        expected
    );
}
