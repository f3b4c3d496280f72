//! Label column validation
//!
//! The label must read as a 0/1 measure: boolean, numeric, or numeric strings
//! that cast cleanly to Float64. Nulls are allowed and ignored by the counts.

use polars::prelude::*;

use super::error::{WoeError, WoeResult};

/// Value of the label that marks a positive row
pub const POSITIVE_LABEL: f64 = 1.0;

/// Value of the label that marks a negative row
pub const NEGATIVE_LABEL: f64 = 0.0;

/// Expression reading the label as Float64, shared by aggregation and checks
pub fn label_expr(label: &str) -> Expr {
    col(label).cast(DataType::Float64)
}

/// Check that every non-null label value is exactly 0 or 1 after casting.
///
/// A label holding a single class passes; the degenerate-totals check in the
/// table builder reports that case with the offending input column.
pub fn validate_binary_label(df: &DataFrame, label: &str) -> WoeResult<()> {
    let column = df.column(label).map_err(|_| WoeError::ColumnNotFound {
        column: label.to_string(),
    })?;

    let float_col = column
        .strict_cast(&DataType::Float64)
        .map_err(|e| WoeError::InvalidLabel {
            column: label.to_string(),
            reason: format!("cannot be read as a number ({})", e),
        })?;

    let unique = float_col.unique()?;
    let mut invalid: Vec<f64> = unique
        .f64()?
        .into_iter()
        .flatten()
        .filter(|&v| v != POSITIVE_LABEL && v != NEGATIVE_LABEL)
        .collect();

    if !invalid.is_empty() {
        invalid.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        return Err(WoeError::InvalidLabel {
            column: label.to_string(),
            reason: format!("found values other than 0 and 1: {:?}", invalid),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_label_valid() {
        let df = df! {
            "y" => [0i32, 1, 0, 1],
        }
        .unwrap();
        assert!(validate_binary_label(&df, "y").is_ok());
    }

    #[test]
    fn test_float_label_valid() {
        let df = df! {
            "y" => [0.0f64, 1.0, 1.0],
        }
        .unwrap();
        assert!(validate_binary_label(&df, "y").is_ok());
    }

    #[test]
    fn test_bool_label_valid() {
        let df = df! {
            "y" => [true, false, true],
        }
        .unwrap();
        assert!(validate_binary_label(&df, "y").is_ok());
    }

    #[test]
    fn test_numeric_string_label_valid() {
        let df = df! {
            "y" => ["0", "1", "1"],
        }
        .unwrap();
        assert!(validate_binary_label(&df, "y").is_ok());
    }

    #[test]
    fn test_nulls_ignored() {
        let df = df! {
            "y" => [Some(1i32), None, Some(0)],
        }
        .unwrap();
        assert!(validate_binary_label(&df, "y").is_ok());
    }

    #[test]
    fn test_single_class_passes_validation() {
        let df = df! {
            "y" => [1i32, 1, 1],
        }
        .unwrap();
        assert!(validate_binary_label(&df, "y").is_ok());
    }

    #[test]
    fn test_non_binary_numeric_rejected() {
        let df = df! {
            "y" => [0i32, 1, 2],
        }
        .unwrap();
        let err = validate_binary_label(&df, "y").unwrap_err();
        assert!(matches!(err, WoeError::InvalidLabel { .. }));
        assert!(err.to_string().contains("2.0"));
    }

    #[test]
    fn test_text_label_rejected() {
        let df = df! {
            "y" => ["good", "bad"],
        }
        .unwrap();
        let err = validate_binary_label(&df, "y").unwrap_err();
        assert!(matches!(err, WoeError::InvalidLabel { .. }));
    }

    #[test]
    fn test_missing_label_column() {
        let df = df! {
            "x" => [0i32, 1],
        }
        .unwrap();
        let err = validate_binary_label(&df, "y").unwrap_err();
        assert!(matches!(err, WoeError::ColumnNotFound { .. }));
    }
}
