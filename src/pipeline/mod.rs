//! Pipeline module - fitting, applying and storing WoE encodings

pub mod aggregate;
pub mod category;
pub mod encoder;
pub mod error;
pub mod loader;
pub mod model;
pub mod persist;
pub mod target;
pub mod woe;

pub use aggregate::{CategoryAggregator, PolarsAggregator};
pub use category::CategoryKey;
pub use encoder::{information_value_of, information_value_with, WoeEncoder, WoeEncoderConfig};
pub use error::{WoeError, WoeResult};
pub use loader::{load_dataset, save_dataset};
pub use model::{output_column_name, WoeModel, WoeTableWrapper};
pub use persist::{load_model, read_metadata, save_model, ModelMetadata, TableEntry};
pub use target::validate_binary_label;
pub use woe::{
    build_woe_table, calculate_woe, information_value, CategoryCount, WoeRow, WoeTable,
    NEGLIGIBLE_IV, SMOOTHING,
};
