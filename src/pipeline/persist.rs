//! Model persistence
//!
//! A model directory holds a `metadata.json` document plus one Parquet file
//! per input column with the relation `{category, p1, p0, woe}`. The Parquet
//! files keep the category column in its original dtype, so a loaded model
//! scores exactly like the one that was saved.

use std::fs::{self, File};
use std::path::Path;

use chrono::Utc;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::{WoeError, WoeResult};
use super::model::{WoeModel, WoeTableWrapper};

/// Name of the metadata document inside a model directory
pub const METADATA_FILE: &str = "metadata.json";

/// Layout version written by this crate
pub const FORMAT_VERSION: u32 = 1;

/// Contents of `metadata.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub format_version: u32,
    pub uid: String,
    pub label_column: String,
    pub output_postfix: String,
    /// RFC 3339 timestamp of the save
    pub created_at: String,
    /// Version of the crate that wrote the model
    pub writer_version: String,
    /// Tables in fit order
    pub tables: Vec<TableEntry>,
}

/// Pointer from an input column to its stored table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableEntry {
    pub input_column: String,
    pub output_column: String,
    /// File name relative to the model directory
    pub file: String,
}

/// Deterministic file name for the table at `index`.
///
/// Characters outside `[A-Za-z0-9_-]` become `_`; the index prefix keeps
/// names unique when two columns sanitize to the same string.
pub fn table_file_name(index: usize, input_column: &str) -> String {
    let sanitized: String = input_column
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect();
    format!("{:03}_{}.parquet", index, sanitized)
}

/// Write `model` into `dir`, creating it if needed.
///
/// Refuses to replace an existing model unless `overwrite` is set. The
/// metadata document is written last, so an interrupted save never looks
/// like a complete model.
pub fn save_model(model: &WoeModel, dir: &Path, overwrite: bool) -> WoeResult<()> {
    let metadata_path = dir.join(METADATA_FILE);
    if metadata_path.exists() && !overwrite {
        return Err(WoeError::persistence(
            dir,
            "a model already exists here (use overwrite to replace it)",
        ));
    }

    fs::create_dir_all(dir).map_err(|e| WoeError::io(dir, e))?;

    let mut entries = Vec::with_capacity(model.tables().len());
    for (index, wrapper) in model.tables().iter().enumerate() {
        let file_name = table_file_name(index, wrapper.input_column());
        let path = dir.join(&file_name);

        let mut frame = wrapper.to_frame()?;
        let file = File::create(&path).map_err(|e| WoeError::io(&path, e))?;
        ParquetWriter::new(file).finish(&mut frame)?;

        entries.push(TableEntry {
            input_column: wrapper.input_column().to_string(),
            output_column: wrapper.output_column().to_string(),
            file: file_name,
        });
    }

    let metadata = ModelMetadata {
        format_version: FORMAT_VERSION,
        uid: model.uid().to_string(),
        label_column: model.label_column().to_string(),
        output_postfix: model.output_postfix().to_string(),
        created_at: Utc::now().to_rfc3339(),
        writer_version: env!("CARGO_PKG_VERSION").to_string(),
        tables: entries,
    };

    let json = serde_json::to_string_pretty(&metadata)?;
    fs::write(&metadata_path, json).map_err(|e| WoeError::io(&metadata_path, e))?;

    info!(model = %model.uid(), dir = %dir.display(), "saved WoE model");
    Ok(())
}

/// Read the metadata document of a model directory
pub fn read_metadata(dir: &Path) -> WoeResult<ModelMetadata> {
    let metadata_path = dir.join(METADATA_FILE);
    if !metadata_path.exists() {
        return Err(WoeError::persistence(dir, format!("missing {}", METADATA_FILE)));
    }

    let json = fs::read_to_string(&metadata_path).map_err(|e| WoeError::io(&metadata_path, e))?;
    let metadata: ModelMetadata = serde_json::from_str(&json)?;

    if metadata.format_version != FORMAT_VERSION {
        return Err(WoeError::persistence(
            dir,
            format!(
                "unsupported format version {} (expected {})",
                metadata.format_version, FORMAT_VERSION
            ),
        ));
    }

    Ok(metadata)
}

/// Rebuild a model written by [`save_model`].
pub fn load_model(dir: &Path) -> WoeResult<WoeModel> {
    let metadata = read_metadata(dir)?;

    let mut tables = Vec::with_capacity(metadata.tables.len());
    for entry in &metadata.tables {
        let path = dir.join(&entry.file);
        let file = File::open(&path).map_err(|e| WoeError::io(&path, e))?;
        let frame = ParquetReader::new(file).finish()?;

        let wrapper = WoeTableWrapper::from_frame(&entry.input_column, &entry.output_column, &frame)
            .map_err(|e| match e {
                WoeError::Persistence { message, .. } => WoeError::persistence(&path, message),
                other => other,
            })?;
        tables.push(wrapper);
    }

    let model = WoeModel::new(
        metadata.uid,
        metadata.output_postfix,
        metadata.label_column,
        tables,
    );
    info!(model = %model.uid(), dir = %dir.display(), "loaded WoE model");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_table_file_name_sanitizes() {
        assert_eq!(table_file_name(0, "region"), "000_region.parquet");
        assert_eq!(table_file_name(12, "home owner/status"), "012_home_owner_status.parquet");
        assert_eq!(table_file_name(3, "a-b_c"), "003_a-b_c.parquet");
    }

    #[test]
    fn test_load_missing_metadata() {
        let dir = TempDir::new().unwrap();
        let err = load_model(dir.path()).unwrap_err();
        assert!(matches!(err, WoeError::Persistence { .. }));
        assert!(err.to_string().contains("metadata.json"));
    }

    #[test]
    fn test_unsupported_format_version() {
        let dir = TempDir::new().unwrap();
        let metadata = ModelMetadata {
            format_version: FORMAT_VERSION + 1,
            uid: "woe_x".to_string(),
            label_column: "y".to_string(),
            output_postfix: "woe".to_string(),
            created_at: Utc::now().to_rfc3339(),
            writer_version: "0.0.0".to_string(),
            tables: Vec::new(),
        };
        fs::write(
            dir.path().join(METADATA_FILE),
            serde_json::to_string(&metadata).unwrap(),
        )
        .unwrap();

        let err = load_model(dir.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported format version"));
    }

    #[test]
    fn test_save_refuses_existing_model_without_overwrite() {
        let dir = TempDir::new().unwrap();
        let model = WoeModel::new("woe_empty", "woe", "y", Vec::new());

        save_model(&model, dir.path(), false).unwrap();
        let err = save_model(&model, dir.path(), false).unwrap_err();
        assert!(matches!(err, WoeError::Persistence { .. }));

        save_model(&model, dir.path(), true).unwrap();
    }

    #[test]
    fn test_metadata_json_written() {
        let dir = TempDir::new().unwrap();
        let model = WoeModel::new("woe_empty", "enc", "label", Vec::new());
        save_model(&model, dir.path(), false).unwrap();

        let metadata = read_metadata(dir.path()).unwrap();
        assert_eq!(metadata.uid, "woe_empty");
        assert_eq!(metadata.output_postfix, "enc");
        assert_eq!(metadata.label_column, "label");
        assert_eq!(metadata.format_version, FORMAT_VERSION);
        assert!(metadata.tables.is_empty());
    }
}
