//! Error types for WoE fitting, transformation and model persistence.

use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Convenience alias used across the pipeline module.
pub type WoeResult<T> = Result<T, WoeError>;

/// Errors raised by the encoder, the fitted model and the persistence layer.
///
/// Every fit-time error is returned before a model exists, so a caller never
/// sees a partially built model.
#[derive(Debug, thiserror::Error)]
pub enum WoeError {
    /// The label has no positives or no negatives for this column.
    ///
    /// Both totals must be strictly positive for `p1`/`p0` to be defined.
    #[error(
        "Label is degenerate for column '{column}': {total_positive} positive and \
         {total_negative} negative rows (both classes are required)"
    )]
    DegenerateLabel {
        column: String,
        total_positive: u64,
        total_negative: u64,
    },

    /// A computed output column already exists in the dataset schema.
    #[error("Output column '{column}' already exists in the dataset")]
    DuplicateColumn { column: String },

    /// The label column cannot be read as a 0/1 measure.
    #[error("Label column '{column}' is not a binary 0/1 measure: {reason}")]
    InvalidLabel { column: String, reason: String },

    /// No input columns were configured.
    #[error("At least one input column is required")]
    NoInputColumns,

    /// A referenced column is missing from the dataset.
    #[error("Column '{column}' not found in dataset")]
    ColumnNotFound { column: String },

    /// The column dtype has no scalar category representation.
    #[error("Column '{column}' has unsupported category type {dtype}")]
    UnsupportedCategoryType { column: String, dtype: String },

    /// A stored model is malformed or has an unknown layout.
    #[error("Invalid model at {}: {message}", path.display())]
    Persistence { path: PathBuf, message: String },

    /// Filesystem failure while reading or writing a model.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Model metadata error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

impl WoeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WoeError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn persistence(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        WoeError::Persistence {
            path: path.into(),
            message: message.into(),
        }
    }
}
