//! Opaque category keys
//!
//! Grouping, table lookup and persistence all treat a category as an opaque
//! equality/hash key. `CategoryKey` gives every scalar polars dtype such a key
//! without assuming strings or numbers.

use std::fmt;

use polars::prelude::*;

use super::error::{WoeError, WoeResult};

/// Hashable key for one cell of a categorical column.
///
/// Floats are keyed by their bit pattern after folding `-0.0` into `0.0` and
/// every NaN into one canonical NaN, so equal-looking values share a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Str(String),
}

impl CategoryKey {
    pub fn float(value: f64) -> Self {
        let normalized = if value == 0.0 {
            0.0
        } else if value.is_nan() {
            f64::NAN
        } else {
            value
        };
        CategoryKey::Float(normalized.to_bits())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CategoryKey::Null)
    }
}

impl From<&str> for CategoryKey {
    fn from(value: &str) -> Self {
        CategoryKey::Str(value.to_string())
    }
}

impl From<i64> for CategoryKey {
    fn from(value: i64) -> Self {
        CategoryKey::Int(value)
    }
}

impl From<bool> for CategoryKey {
    fn from(value: bool) -> Self {
        CategoryKey::Bool(value)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryKey::Null => write!(f, "<null>"),
            CategoryKey::Bool(b) => write!(f, "{}", b),
            CategoryKey::Int(n) => write!(f, "{}", n),
            CategoryKey::UInt(n) => write!(f, "{}", n),
            CategoryKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            CategoryKey::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Convert every cell of a column into a `CategoryKey`, nulls included.
///
/// Integer widths collapse to `Int`/`UInt`, floats to `Float`. Dtypes without a
/// native scalar key (categorical, enum, temporal, decimal) are keyed by their
/// string rendering. Nested dtypes are rejected.
pub fn keys_from_column(column: &Column) -> WoeResult<Vec<CategoryKey>> {
    let dtype = column.dtype();

    let keys: Vec<CategoryKey> = match dtype {
        DataType::Null => vec![CategoryKey::Null; column.len()],
        DataType::Boolean => column
            .bool()?
            .into_iter()
            .map(|v| v.map_or(CategoryKey::Null, CategoryKey::Bool))
            .collect(),
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => {
            let cast = column.cast(&DataType::Int64)?;
            cast.i64()?
                .into_iter()
                .map(|v| v.map_or(CategoryKey::Null, CategoryKey::Int))
                .collect()
        }
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            let cast = column.cast(&DataType::UInt64)?;
            cast.u64()?
                .into_iter()
                .map(|v| v.map_or(CategoryKey::Null, CategoryKey::UInt))
                .collect()
        }
        DataType::Float32 | DataType::Float64 => {
            let cast = column.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map_or(CategoryKey::Null, CategoryKey::float))
                .collect()
        }
        DataType::String => column
            .str()?
            .into_iter()
            .map(|v| v.map_or(CategoryKey::Null, CategoryKey::from))
            .collect(),
        dt if dt.is_nested() || matches!(dt, DataType::Binary) => {
            return Err(WoeError::UnsupportedCategoryType {
                column: column.name().to_string(),
                dtype: dt.to_string(),
            });
        }
        _ => {
            let cast = column.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map_or(CategoryKey::Null, CategoryKey::from))
                .collect()
        }
    };

    Ok(keys)
}

/// Build a column from keys, restoring `dtype` (the dtype of the column the
/// keys were read from).
pub fn keys_to_column(name: &str, keys: &[CategoryKey], dtype: &DataType) -> WoeResult<Column> {
    let first = keys.iter().find(|k| !k.is_null());

    let column = match first {
        None | Some(CategoryKey::Null) => Column::full_null(name.into(), keys.len(), dtype),
        Some(CategoryKey::Bool(_)) => {
            let values: Vec<Option<bool>> = keys
                .iter()
                .map(|k| match k {
                    CategoryKey::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        Some(CategoryKey::Int(_)) => {
            let values: Vec<Option<i64>> = keys
                .iter()
                .map(|k| match k {
                    CategoryKey::Int(n) => Some(*n),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        Some(CategoryKey::UInt(_)) => {
            let values: Vec<Option<u64>> = keys
                .iter()
                .map(|k| match k {
                    CategoryKey::UInt(n) => Some(*n),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        Some(CategoryKey::Float(_)) => {
            let values: Vec<Option<f64>> = keys
                .iter()
                .map(|k| match k {
                    CategoryKey::Float(bits) => Some(f64::from_bits(*bits)),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
        Some(CategoryKey::Str(_)) => {
            let values: Vec<Option<&str>> = keys
                .iter()
                .map(|k| match k {
                    CategoryKey::Str(s) => Some(s.as_str()),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        }
    };

    if column.dtype() == dtype {
        Ok(column)
    } else {
        Ok(column.cast(dtype)?)
    }
}
