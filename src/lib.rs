//! woe-encoder: Weight of Evidence Encoding Library
//!
//! Encodes categorical columns by the log-odds of a binary label per
//! category, learned from training data and applied to any later dataset.
//! Also reports the Information Value of each encoded column.

pub mod cli;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod utils;
