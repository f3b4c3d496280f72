//! Weight of Evidence (WoE) tables and Information Value (IV)
//!
//! Turns per-category positive/negative counts into a lookup table of
//! `p1`, `p0` and `woe`, where
//!
//! ```text
//! p1  = positive_count / total_positive
//! p0  = negative_count / total_negative
//! woe = ln((err + positive_count) / total_positive * total_negative / (negative_count + err))
//! ```
//!
//! The smoothing constant only enters the odds ratio; the totals stay
//! unsmoothed, so `p1` and `p0` each sum to exactly one over a table.

use std::collections::HashMap;
use std::hash::Hash;

use super::category::CategoryKey;
use super::error::{WoeError, WoeResult};

/// Additive smoothing applied inside the WoE odds ratio to avoid `ln(0)`
pub const SMOOTHING: f64 = 0.01;

/// IV below this value is conventionally treated as no predictive power
pub const NEGLIGIBLE_IV: f64 = 0.02;

/// Positive and negative label counts for one distinct category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount<K = CategoryKey> {
    pub category: K,
    pub positive_count: u64,
    pub negative_count: u64,
}

impl<K> CategoryCount<K> {
    pub fn new(category: K, positive_count: u64, negative_count: u64) -> Self {
        Self {
            category,
            positive_count,
            negative_count,
        }
    }
}

/// One category of a fitted WoE table
#[derive(Debug, Clone, PartialEq)]
pub struct WoeRow<K = CategoryKey> {
    /// Category value (null categories form their own row)
    pub category: K,
    /// Share of all positives falling in this category
    pub p1: f64,
    /// Share of all negatives falling in this category
    pub p0: f64,
    /// Smoothed log odds ratio `ln(p1 / p0)`
    pub woe: f64,
}

impl<K> WoeRow<K> {
    /// Contribution of this category to the table's IV
    pub fn iv_contribution(&self) -> f64 {
        self.woe * (self.p1 - self.p0)
    }
}

/// Immutable category -> WoE table for one input column
#[derive(Debug, Clone, PartialEq)]
pub struct WoeTable<K = CategoryKey> {
    rows: Vec<WoeRow<K>>,
}

impl<K: Eq + Hash> WoeTable<K> {
    /// Wrap already computed rows, e.g. when reading a stored model.
    pub fn from_rows(rows: Vec<WoeRow<K>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[WoeRow<K>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Materialize the category -> woe mapping used by a transform.
    pub fn lookup(&self) -> HashMap<&K, f64> {
        self.rows.iter().map(|row| (&row.category, row.woe)).collect()
    }

    /// WoE stored for `category`, or `None` if it was not seen at fit time.
    pub fn woe_of(&self, category: &K) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| &row.category == category)
            .map(|row| row.woe)
    }

    pub fn information_value(&self) -> f64 {
        information_value(self)
    }
}

/// Build a WoE table from grouped counts.
///
/// Rows keep the order of `counts`. Fails with `DegenerateLabel` when the
/// counts hold no positives or no negatives at all.
///
/// # Arguments
/// * `column` - Name of the input column, used in error messages
/// * `counts` - One entry per distinct category
pub fn build_woe_table<K: Eq + Hash>(
    column: &str,
    counts: Vec<CategoryCount<K>>,
) -> WoeResult<WoeTable<K>> {
    let total_positive: u64 = counts.iter().map(|c| c.positive_count).sum();
    let total_negative: u64 = counts.iter().map(|c| c.negative_count).sum();

    if total_positive == 0 || total_negative == 0 {
        return Err(WoeError::DegenerateLabel {
            column: column.to_string(),
            total_positive,
            total_negative,
        });
    }

    let total_positive = total_positive as f64;
    let total_negative = total_negative as f64;

    let rows = counts
        .into_iter()
        .map(|count| {
            let positive = count.positive_count as f64;
            let negative = count.negative_count as f64;

            WoeRow {
                category: count.category,
                p1: positive / total_positive,
                p0: negative / total_negative,
                woe: calculate_woe(positive, negative, total_positive, total_negative),
            }
        })
        .collect();

    Ok(WoeTable { rows })
}

/// Smoothed WoE for a single category.
///
/// Finite for any non-negative counts as long as both totals are positive.
pub fn calculate_woe(
    positive: f64,
    negative: f64,
    total_positive: f64,
    total_negative: f64,
) -> f64 {
    ((SMOOTHING + positive) / total_positive * total_negative / (negative + SMOOTHING)).ln()
}

/// Information Value of a table: `Σ woe * (p1 - p0)`
pub fn information_value<K>(table: &WoeTable<K>) -> f64 {
    table.rows.iter().map(WoeRow::iv_contribution).sum()
}
