//! Dataset loader for CSV and Parquet files

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::*;

/// Load a dataset from a file (CSV or Parquet based on extension)
///
/// # Arguments
/// * `path` - Input file path
/// * `infer_schema_length` - Rows used for CSV schema inference (0 = full scan)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = file_extension(path);

    let lf = match extension.as_str() {
        "csv" => {
            let schema_length = if infer_schema_length == 0 {
                None
            } else {
                Some(infer_schema_length)
            };
            LazyCsvReader::new(path)
                .with_infer_schema_length(schema_length)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))
}

/// Save dataset to file (CSV or Parquet based on extension)
pub fn save_dataset(df: &mut DataFrame, path: &Path) -> Result<()> {
    let extension = file_extension(path);

    match extension.as_str() {
        "csv" => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
        }
        "parquet" => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            ParquetWriter::new(file)
                .finish(df)
                .with_context(|| format!("Failed to write Parquet file: {}", path.display()))?;
        }
        _ => anyhow::bail!(
            "Unsupported output format: {}. Supported formats: csv, parquet",
            extension
        ),
    }

    Ok(())
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        let mut df = df! {
            "x" => ["a", "b"],
            "y" => [1i64, 0],
        }
        .unwrap();

        save_dataset(&mut df, &path).unwrap();
        let loaded = load_dataset(&path, 100).unwrap();
        assert_eq!(loaded.shape(), (2, 2));
    }

    #[test]
    fn test_parquet_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.parquet");
        let mut df = df! {
            "x" => [Some("a"), None],
            "y" => [1i32, 0],
        }
        .unwrap();

        save_dataset(&mut df, &path).unwrap();
        let loaded = load_dataset(&path, 0).unwrap();
        assert!(loaded.equals_missing(&df));
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_dataset(Path::new("data.xlsx"), 100).unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));
    }
}
