//! Fitted WoE model
//!
//! A `WoeModel` is an ordered list of per-column WoE tables produced by one
//! fit. It never changes after construction; refitting builds a new model.

use polars::prelude::*;
use rayon::prelude::*;
use tracing::info;
use uuid::Uuid;

use super::category::{keys_from_column, keys_to_column, CategoryKey};
use super::error::{WoeError, WoeResult};
use super::woe::{WoeRow, WoeTable};

/// Column names of the per-table relation exposed for persistence
pub const CATEGORY_FIELD: &str = "category";
pub const P1_FIELD: &str = "p1";
pub const P0_FIELD: &str = "p0";
pub const WOE_FIELD: &str = "woe";

/// Output column name for an input column: `{input}_{postfix}`
pub fn output_column_name(input_column: &str, output_postfix: &str) -> String {
    format!("{}_{}", input_column, output_postfix)
}

/// One fitted WoE table bound to its input and output column names
#[derive(Debug, Clone, PartialEq)]
pub struct WoeTableWrapper {
    input_column: String,
    output_column: String,
    /// Dtype of the input column at fit time
    category_dtype: DataType,
    table: WoeTable,
}

impl WoeTableWrapper {
    pub fn new(
        input_column: impl Into<String>,
        output_column: impl Into<String>,
        category_dtype: DataType,
        table: WoeTable,
    ) -> Self {
        Self {
            input_column: input_column.into(),
            output_column: output_column.into(),
            category_dtype,
            table,
        }
    }

    pub fn input_column(&self) -> &str {
        &self.input_column
    }

    pub fn output_column(&self) -> &str {
        &self.output_column
    }

    pub fn category_dtype(&self) -> &DataType {
        &self.category_dtype
    }

    pub fn table(&self) -> &WoeTable {
        &self.table
    }

    pub fn information_value(&self) -> f64 {
        self.table.information_value()
    }

    /// The table as a `{category, p1, p0, woe}` frame, category in its
    /// original dtype.
    pub fn to_frame(&self) -> WoeResult<DataFrame> {
        let rows = self.table.rows();
        let keys: Vec<CategoryKey> = rows.iter().map(|r| r.category.clone()).collect();

        let category = keys_to_column(CATEGORY_FIELD, &keys, &self.category_dtype)?;
        let p1 = Column::new(P1_FIELD.into(), rows.iter().map(|r| r.p1).collect::<Vec<f64>>());
        let p0 = Column::new(P0_FIELD.into(), rows.iter().map(|r| r.p0).collect::<Vec<f64>>());
        let woe = Column::new(WOE_FIELD.into(), rows.iter().map(|r| r.woe).collect::<Vec<f64>>());

        Ok(DataFrame::new(vec![category, p1, p0, woe])?)
    }

    /// Rebuild a wrapper from a frame produced by [`WoeTableWrapper::to_frame`].
    pub fn from_frame(
        input_column: impl Into<String>,
        output_column: impl Into<String>,
        frame: &DataFrame,
    ) -> WoeResult<Self> {
        let input_column = input_column.into();

        let category = frame.column(CATEGORY_FIELD)?;
        let category_dtype = category.dtype().clone();
        let keys = keys_from_column(category)?;

        let p1 = required_f64(frame, P1_FIELD, &input_column)?;
        let p0 = required_f64(frame, P0_FIELD, &input_column)?;
        let woe = required_f64(frame, WOE_FIELD, &input_column)?;

        let rows = keys
            .into_iter()
            .zip(p1)
            .zip(p0)
            .zip(woe)
            .map(|(((category, p1), p0), woe)| WoeRow {
                category,
                p1,
                p0,
                woe,
            })
            .collect();

        Ok(Self {
            input_column,
            output_column: output_column.into(),
            category_dtype,
            table: WoeTable::from_rows(rows),
        })
    }

    /// Map every value of `column` to its WoE; unseen categories become null.
    ///
    /// Values are first cast (non-strict) to the fit-time dtype, so a column
    /// inferred as Int64 at scoring time still matches a String-typed fit.
    /// A value that does not convert scores as unseen, not as the null group.
    fn encode(&self, column: &Column) -> WoeResult<Column> {
        let lookup = self.table.lookup();

        let values: Vec<Option<f64>> = if column.dtype() == &self.category_dtype
            || matches!(self.category_dtype, DataType::Null)
        {
            keys_from_column(column)?
                .iter()
                .map(|k| lookup.get(k).copied())
                .collect()
        } else {
            let original = keys_from_column(column)?;
            let converted = keys_from_column(&column.cast(&self.category_dtype)?)?;
            original
                .iter()
                .zip(converted.iter())
                .map(|(before, after)| {
                    if after.is_null() && !before.is_null() {
                        None
                    } else {
                        lookup.get(after).copied()
                    }
                })
                .collect()
        };

        Ok(Column::new(self.output_column.as_str().into(), values))
    }
}

/// Read a non-null Float64 field of a stored table
fn required_f64(frame: &DataFrame, field: &str, input_column: &str) -> WoeResult<Vec<f64>> {
    let cast = frame.column(field)?.cast(&DataType::Float64)?;
    cast.f64()?
        .into_iter()
        .map(|v| {
            v.ok_or_else(|| {
                WoeError::persistence(
                    input_column,
                    format!("null value in '{}' of stored table", field),
                )
            })
        })
        .collect()
}

/// Fitted Weight of Evidence model
#[derive(Debug, Clone, PartialEq)]
pub struct WoeModel {
    uid: String,
    output_postfix: String,
    label_column: String,
    tables: Vec<WoeTableWrapper>,
}

impl WoeModel {
    pub fn new(
        uid: impl Into<String>,
        output_postfix: impl Into<String>,
        label_column: impl Into<String>,
        tables: Vec<WoeTableWrapper>,
    ) -> Self {
        Self {
            uid: uid.into(),
            output_postfix: output_postfix.into(),
            label_column: label_column.into(),
            tables,
        }
    }

    /// Fresh random model identifier
    pub fn generate_uid() -> String {
        format!("woe_{}", Uuid::new_v4().simple())
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn output_postfix(&self) -> &str {
        &self.output_postfix
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn tables(&self) -> &[WoeTableWrapper] {
        &self.tables
    }

    /// Table fitted for `input_column`, if any
    pub fn table(&self, input_column: &str) -> Option<&WoeTableWrapper> {
        self.tables.iter().find(|t| t.input_column == input_column)
    }

    pub fn input_columns(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.input_column()).collect()
    }

    pub fn output_columns(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.output_column()).collect()
    }

    /// Append one WoE column per fitted table to a copy of `df`.
    ///
    /// Categories that were not seen at fit time score as null. A null input
    /// scores as the null group's WoE when that group existed at fit time.
    pub fn transform(&self, df: &DataFrame) -> WoeResult<DataFrame> {
        let schema = df.schema();
        for wrapper in &self.tables {
            if !schema.contains(wrapper.input_column()) {
                return Err(WoeError::ColumnNotFound {
                    column: wrapper.input_column.clone(),
                });
            }
            if schema.contains(wrapper.output_column()) {
                return Err(WoeError::DuplicateColumn {
                    column: wrapper.output_column.clone(),
                });
            }
        }

        let encoded: Vec<Column> = self
            .tables
            .par_iter()
            .map(|wrapper| wrapper.encode(df.column(wrapper.input_column())?))
            .collect::<WoeResult<Vec<Column>>>()?;

        let mut out = df.clone();
        for column in encoded {
            out.with_column(column)?;
        }

        info!(
            model = %self.uid,
            rows = df.height(),
            columns = self.tables.len(),
            "applied WoE model"
        );
        Ok(out)
    }

    /// Information Value per input column, in fit order
    pub fn information_values(&self) -> Vec<(String, f64)> {
        self.tables
            .iter()
            .map(|t| (t.input_column.clone(), t.information_value()))
            .collect()
    }
}
