//! WoE table export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::pipeline::{CategoryKey, WoeModel, WoeTableWrapper};

/// Metadata about the fit run
#[derive(Serialize)]
pub struct FitMetadata {
    /// Timestamp of the export (ISO 8601 format)
    pub timestamp: String,
    /// woe-encoder version
    pub woe_encoder_version: String,
    /// Model identifier
    pub model_uid: String,
    /// Input file path
    pub input_file: String,
    /// Label column name
    pub label_column: String,
    /// Postfix appended to output columns
    pub output_postfix: String,
    /// Rows in the training data
    pub rows: usize,
}

/// One row of an exported WoE table
#[derive(Serialize)]
pub struct WoeExportRow {
    /// Category value; JSON null for the null group
    pub category: Value,
    pub p1: f64,
    pub p0: f64,
    pub woe: f64,
}

/// One exported column
#[derive(Serialize)]
pub struct WoeExportColumn {
    pub input_column: String,
    pub output_column: String,
    pub category_dtype: String,
    pub iv: f64,
    pub rows: Vec<WoeExportRow>,
}

/// Complete WoE export with metadata
#[derive(Serialize)]
pub struct WoeExport {
    pub metadata: FitMetadata,
    pub columns: Vec<WoeExportColumn>,
}

/// JSON rendering of a category key.
///
/// Non-finite floats have no JSON number form and are written as strings.
fn category_value(key: &CategoryKey) -> Value {
    match key {
        CategoryKey::Null => Value::Null,
        CategoryKey::Bool(b) => Value::Bool(*b),
        CategoryKey::Int(n) => Value::from(*n),
        CategoryKey::UInt(n) => Value::from(*n),
        CategoryKey::Float(bits) => {
            let value = f64::from_bits(*bits);
            serde_json::Number::from_f64(value)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(value.to_string()))
        }
        CategoryKey::Str(s) => Value::String(s.clone()),
    }
}

fn export_column(wrapper: &WoeTableWrapper) -> WoeExportColumn {
    WoeExportColumn {
        input_column: wrapper.input_column().to_string(),
        output_column: wrapper.output_column().to_string(),
        category_dtype: wrapper.category_dtype().to_string(),
        iv: wrapper.information_value(),
        rows: wrapper
            .table()
            .rows()
            .iter()
            .map(|row| WoeExportRow {
                category: category_value(&row.category),
                p1: row.p1,
                p0: row.p0,
                woe: row.woe,
            })
            .collect(),
    }
}

/// Build the export document for `model`
pub fn build_woe_export(model: &WoeModel, input_file: &str, rows: usize) -> WoeExport {
    WoeExport {
        metadata: FitMetadata {
            timestamp: Utc::now().to_rfc3339(),
            woe_encoder_version: env!("CARGO_PKG_VERSION").to_string(),
            model_uid: model.uid().to_string(),
            input_file: input_file.to_string(),
            label_column: model.label_column().to_string(),
            output_postfix: model.output_postfix().to_string(),
            rows,
        },
        columns: model.tables().iter().map(export_column).collect(),
    }
}

/// Export every WoE table of `model` to a JSON file
///
/// # Arguments
/// * `model` - Fitted model
/// * `input_file` - Training data path, recorded in the metadata
/// * `rows` - Training row count
/// * `output_path` - Path to write the JSON file
pub fn export_woe_tables(
    model: &WoeModel,
    input_file: &str,
    rows: usize,
    output_path: &Path,
) -> Result<()> {
    let export = build_woe_export(model, input_file, rows);

    let json = serde_json::to_string_pretty(&export)
        .context("Failed to serialize WoE tables to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write WoE report to {}", output_path.display()))?;

    Ok(())
}
