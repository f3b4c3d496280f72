//! woe: Weight of Evidence encoding CLI
//!
//! Fits per-category WoE tables against a binary label, saves them as a
//! model directory and applies them to new data.

use anyhow::Result;
use clap::Parser;

use woe_encoder::cli::commands::{run_fit, run_iv, run_transform, FitOptions};
use woe_encoder::cli::{transform_output_path, Cli, Commands};
use woe_encoder::logging::init_tracing;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Fit {
            input,
            label,
            columns,
            output_postfix,
            model,
            overwrite,
            report,
        } => run_fit(&FitOptions {
            input,
            label,
            columns,
            output_postfix,
            model_dir: model,
            overwrite: *overwrite,
            report: report.as_deref(),
            infer_schema_length: cli.infer_schema_length,
        }),
        Commands::Transform {
            model,
            input,
            output,
        } => {
            let output_path = transform_output_path(input, output.as_deref());
            run_transform(model, input, &output_path, cli.infer_schema_length)
        }
        Commands::Iv {
            input,
            label,
            columns,
        } => run_iv(input, label, columns, cli.infer_schema_length),
    }
}
