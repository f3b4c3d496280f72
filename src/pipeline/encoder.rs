//! WoE encoder: configuration and fitting
//!
//! The encoder holds only configuration. Each call to [`WoeEncoder::fit`]
//! validates the dataset, aggregates every input column independently and
//! returns a brand new [`WoeModel`].

use std::collections::HashSet;

use polars::prelude::*;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::aggregate::{CategoryAggregator, PolarsAggregator};
use super::error::{WoeError, WoeResult};
use super::model::{output_column_name, WoeModel, WoeTableWrapper};
use super::target::validate_binary_label;
use super::woe::{build_woe_table, information_value, NEGLIGIBLE_IV};

/// Encoder hyperparameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WoeEncoderConfig {
    /// Categorical columns to encode, in output order
    pub input_columns: Vec<String>,
    /// Binary 0/1 label column
    pub label_column: String,
    /// Appended to each input column name: `{input}_{postfix}`
    pub output_postfix: String,
}

impl WoeEncoderConfig {
    pub fn new(
        input_columns: Vec<String>,
        label_column: impl Into<String>,
        output_postfix: impl Into<String>,
    ) -> Self {
        Self {
            input_columns,
            label_column: label_column.into(),
            output_postfix: output_postfix.into(),
        }
    }

    /// Output column names, one per input column
    pub fn output_columns(&self) -> Vec<String> {
        self.input_columns
            .iter()
            .map(|c| output_column_name(c, &self.output_postfix))
            .collect()
    }
}

/// Fits [`WoeModel`]s from a dataset
#[derive(Debug, Clone)]
pub struct WoeEncoder {
    config: WoeEncoderConfig,
}

impl WoeEncoder {
    pub fn new(config: WoeEncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WoeEncoderConfig {
        &self.config
    }

    /// Fit using polars for the grouped counts.
    pub fn fit(&self, df: &DataFrame) -> WoeResult<WoeModel> {
        self.fit_with(df, &PolarsAggregator)
    }

    /// Fit with a caller-supplied aggregation service.
    ///
    /// All schema checks run before the aggregator is called. Columns are
    /// fitted in parallel; the first failure aborts the whole fit.
    pub fn fit_with<A: CategoryAggregator>(
        &self,
        df: &DataFrame,
        aggregator: &A,
    ) -> WoeResult<WoeModel> {
        self.check_schema(df)?;
        validate_binary_label(df, &self.config.label_column)?;

        let label = self.config.label_column.as_str();
        let postfix = self.config.output_postfix.as_str();

        let tables: Vec<WoeTableWrapper> = self
            .config
            .input_columns
            .par_iter()
            .map(|input| -> WoeResult<WoeTableWrapper> {
                let counts = aggregator.grouped_counts(df, input, label)?;
                let table = build_woe_table(input, counts)?;
                let dtype = df.column(input)?.dtype().clone();

                let iv = information_value(&table);
                debug!(column = %input, categories = table.len(), iv, "fitted WoE table");
                if iv < NEGLIGIBLE_IV {
                    warn!(column = %input, iv, "column has negligible information value");
                }

                Ok(WoeTableWrapper::new(
                    input.clone(),
                    output_column_name(input, postfix),
                    dtype,
                    table,
                ))
            })
            .collect::<WoeResult<Vec<_>>>()?;

        let model = WoeModel::new(WoeModel::generate_uid(), postfix, label, tables);
        info!(
            model = %model.uid(),
            columns = model.tables().len(),
            rows = df.height(),
            "fitted WoE model"
        );
        Ok(model)
    }

    /// Name checks that must pass before any aggregation work
    fn check_schema(&self, df: &DataFrame) -> WoeResult<()> {
        if self.config.input_columns.is_empty() {
            return Err(WoeError::NoInputColumns);
        }

        let schema = df.schema();
        let mut seen = HashSet::new();
        for output in self.config.output_columns() {
            if schema.contains(&output) || !seen.insert(output.clone()) {
                return Err(WoeError::DuplicateColumn { column: output });
            }
        }

        for column in self
            .config
            .input_columns
            .iter()
            .chain(std::iter::once(&self.config.label_column))
        {
            if !schema.contains(column) {
                return Err(WoeError::ColumnNotFound {
                    column: column.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Information Value of `column` against `label`, without building a model.
pub fn information_value_of(df: &DataFrame, column: &str, label: &str) -> WoeResult<f64> {
    information_value_with(df, column, label, &PolarsAggregator)
}

/// [`information_value_of`] with a caller-supplied aggregation service.
pub fn information_value_with<A: CategoryAggregator>(
    df: &DataFrame,
    column: &str,
    label: &str,
    aggregator: &A,
) -> WoeResult<f64> {
    if !df.schema().contains(column) {
        return Err(WoeError::ColumnNotFound {
            column: column.to_string(),
        });
    }
    validate_binary_label(df, label)?;

    let counts = aggregator.grouped_counts(df, column, label)?;
    let table = build_woe_table(column, counts)?;
    Ok(information_value(&table))
}
