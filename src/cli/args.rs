//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// woe - Weight of Evidence encoding for categorical features
#[derive(Parser, Debug)]
#[command(name = "woe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000", global = true)]
    pub infer_schema_length: usize,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit WoE tables on a labelled dataset and save the model
    Fit {
        /// Training data (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Binary 0/1 label column
        #[arg(short, long)]
        label: String,

        /// Categorical columns to encode (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Postfix for output columns: <column>_<postfix>
        #[arg(short = 'p', long, default_value = "woe", value_parser = validate_postfix)]
        output_postfix: String,

        /// Directory to write the model into
        #[arg(short, long)]
        model: PathBuf,

        /// Replace a model already stored in the model directory
        #[arg(long, default_value = "false")]
        overwrite: bool,

        /// Optional JSON export of every WoE table
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Apply a saved model to a dataset
    Transform {
        /// Model directory written by `woe fit`
        #[arg(short, long)]
        model: PathBuf,

        /// Data to encode (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (CSV or Parquet, determined by extension).
        /// Defaults to input directory with '_woe' suffix (e.g., data.csv → data_woe.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the Information Value of categorical columns
    Iv {
        /// Labelled data (CSV or Parquet)
        #[arg(short, long)]
        input: PathBuf,

        /// Binary 0/1 label column
        #[arg(short, long)]
        label: String,

        /// Categorical columns to score (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        columns: Vec<String>,
    },
}

/// Output path for `transform`, deriving from input if not explicitly provided.
/// The derived path will be in the same directory as the input with a '_woe' suffix.
pub fn transform_output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    output.map(Path::to_path_buf).unwrap_or_else(|| {
        let parent = input.parent().unwrap_or_else(|| Path::new("."));
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let extension = input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("parquet");
        parent.join(format!("{}_woe.{}", stem, extension))
    })
}

/// Validator for output_postfix parameter
fn validate_postfix(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("output postfix must not be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}
