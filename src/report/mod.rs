//! Report module - IV summaries and WoE table exports

pub mod iv_summary;
pub mod woe_export;

pub use iv_summary::*;
pub use woe_export::*;
