//! CLI module - argument parsing and subcommand runners

mod args;
pub mod commands;

pub use args::{transform_output_path, Cli, Commands};
