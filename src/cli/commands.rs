//! Subcommand runners: fit, transform and iv

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use console::style;
use polars::prelude::DataFrame;

use crate::pipeline::{
    information_value_of, load_dataset, load_model, save_dataset, save_model, WoeEncoder,
    WoeEncoderConfig,
};
use crate::report::{export_woe_tables, IvSummary};
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

/// Parameters for `woe fit`
pub struct FitOptions<'a> {
    pub input: &'a Path,
    pub label: &'a str,
    pub columns: &'a [String],
    pub output_postfix: &'a str,
    pub model_dir: &'a Path,
    pub overwrite: bool,
    pub report: Option<&'a Path>,
    pub infer_schema_length: usize,
}

/// Load a dataset behind a spinner and print its shape
fn load_step(input: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let df = load_dataset(input, infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", df.height());
    println!("      Columns: {}", df.width());
    print_step_time(step_start.elapsed());

    Ok(df)
}

/// Fit a model, save it and optionally export the tables
pub fn run_fit(options: &FitOptions) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(
        options.input,
        Some(options.label),
        options.columns,
        options.model_dir,
    );

    print_step_header(1, "Load Dataset");
    let df = load_step(options.input, options.infer_schema_length)?;

    print_step_header(2, "Fit WoE Tables");
    let step_start = Instant::now();
    let spinner = create_spinner("Aggregating categories...");
    let encoder = WoeEncoder::new(WoeEncoderConfig::new(
        options.columns.to_vec(),
        options.label,
        options.output_postfix,
    ));
    let model = encoder.fit(&df).context("Failed to fit WoE model")?;

    let summary = IvSummary::from_model(&model);
    let negligible = summary.negligible_columns();
    if negligible.is_empty() {
        finish_with_success(&spinner, "WoE tables fitted");
    } else {
        finish_with_warning(&spinner, "WoE tables fitted");
        print_count(
            "column(s) with negligible IV",
            negligible.len(),
            Some("(<0.02)"),
        );
    }
    print_step_time(step_start.elapsed());

    print_step_header(3, "Save Model");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing model...");
    save_model(&model, options.model_dir, options.overwrite).with_context(|| {
        format!("Failed to save model to {}", options.model_dir.display())
    })?;
    finish_with_success(
        &spinner,
        &format!("Saved model {} to {}", model.uid(), options.model_dir.display()),
    );

    if let Some(report) = options.report {
        export_woe_tables(
            &model,
            &options.input.display().to_string(),
            df.height(),
            report,
        )?;
        print_success(&format!("WoE report written to {}", report.display()));
    }
    print_step_time(step_start.elapsed());

    summary.display();
    print_completion("WoE fit complete!");

    Ok(())
}

/// Apply a saved model and write the encoded dataset
pub fn run_transform(
    model_dir: &Path,
    input: &Path,
    output: &Path,
    infer_schema_length: usize,
) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));

    print_step_header(1, "Load Model");
    let step_start = Instant::now();
    let spinner = create_spinner("Reading model...");
    let model = load_model(model_dir)
        .with_context(|| format!("Failed to load model from {}", model_dir.display()))?;
    finish_with_success(&spinner, &format!("Loaded model {}", model.uid()));
    print_step_time(step_start.elapsed());

    let columns: Vec<String> = model.input_columns().iter().map(|c| c.to_string()).collect();
    print_config(input, None, &columns, output);

    print_step_header(2, "Load Dataset");
    let df = load_step(input, infer_schema_length)?;

    print_step_header(3, "Apply WoE Encoding");
    let step_start = Instant::now();
    let spinner = create_spinner("Encoding columns...");
    let mut encoded = model.transform(&df).context("Failed to apply WoE model")?;
    finish_with_success(&spinner, "Encoding complete");

    for output_column in model.output_columns() {
        let unseen = encoded.column(output_column)?.null_count();
        if unseen > 0 {
            print_info(&format!(
                "{}: {} row(s) without a fitted category",
                output_column, unseen
            ));
        }
    }
    print_step_time(step_start.elapsed());

    print_step_header(4, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut encoded, output)?;
    finish_with_success(&spinner, &format!("Saved to {}", output.display()));
    print_step_time(step_start.elapsed());

    print_completion("WoE transform complete!");

    Ok(())
}

/// Print the IV of each column without saving anything
pub fn run_iv(input: &Path, label: &str, columns: &[String], infer_schema_length: usize) -> Result<()> {
    let df = load_dataset(input, infer_schema_length)?;

    let spinner = create_spinner("Computing information values...");
    let mut summary = IvSummary::new();
    for column in columns {
        let iv = information_value_of(&df, column, label)
            .with_context(|| format!("Failed to compute IV for '{}'", column))?;
        summary.add(column.clone(), None, iv);
    }
    finish_with_success(&spinner, &format!("{} column(s) scored", columns.len()));

    summary.display();
    println!();

    Ok(())
}
