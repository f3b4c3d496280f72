//! Grouped positive/negative counts per category
//!
//! The encoder never counts rows itself. It asks a `CategoryAggregator` for
//! one `CategoryCount` per distinct category (nulls included) and works on
//! those aggregates only.

use polars::prelude::*;
use tracing::debug;

use super::category::keys_from_column;
use super::error::WoeResult;
use super::target::{label_expr, NEGATIVE_LABEL, POSITIVE_LABEL};
use super::woe::CategoryCount;

const POSITIVE_COUNT: &str = "__woe_positive_count";
const NEGATIVE_COUNT: &str = "__woe_negative_count";

/// Source of grouped label counts.
///
/// Implementations must be read-only with respect to `df` and safe to call
/// from several threads at once.
pub trait CategoryAggregator: Sync {
    /// Count label == 1 and label == 0 rows for each distinct value of
    /// `category_column`. Null categories form their own group; null labels
    /// count toward neither measure.
    fn grouped_counts(
        &self,
        df: &DataFrame,
        category_column: &str,
        label_column: &str,
    ) -> WoeResult<Vec<CategoryCount>>;
}

/// Aggregator backed by a polars lazy group-by.
///
/// Groups come back in order of first appearance.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolarsAggregator;

impl CategoryAggregator for PolarsAggregator {
    fn grouped_counts(
        &self,
        df: &DataFrame,
        category_column: &str,
        label_column: &str,
    ) -> WoeResult<Vec<CategoryCount>> {
        let label = label_expr(label_column);

        let grouped = df
            .clone()
            .lazy()
            .group_by_stable([col(category_column)])
            .agg([
                label
                    .clone()
                    .eq(lit(POSITIVE_LABEL))
                    .cast(DataType::UInt64)
                    .sum()
                    .alias(POSITIVE_COUNT),
                label
                    .eq(lit(NEGATIVE_LABEL))
                    .cast(DataType::UInt64)
                    .sum()
                    .alias(NEGATIVE_COUNT),
            ])
            .collect()?;

        let counts = counts_from_frame(&grouped, category_column)?;
        debug!(
            column = category_column,
            categories = counts.len(),
            "aggregated category counts"
        );
        Ok(counts)
    }
}

/// Read a grouped frame (category, positive, negative) into counts
fn counts_from_frame(grouped: &DataFrame, category_column: &str) -> WoeResult<Vec<CategoryCount>> {
    let keys = keys_from_column(grouped.column(category_column)?)?;

    let positives = grouped.column(POSITIVE_COUNT)?.cast(&DataType::UInt64)?;
    let negatives = grouped.column(NEGATIVE_COUNT)?.cast(&DataType::UInt64)?;

    let counts = keys
        .into_iter()
        .zip(positives.u64()?.into_iter())
        .zip(negatives.u64()?.into_iter())
        .map(|((category, p), n)| CategoryCount::new(category, p.unwrap_or(0), n.unwrap_or(0)))
        .collect();

    Ok(counts)
}
