//! Information Value summary table

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{WoeModel, NEGLIGIBLE_IV};

/// Conventional predictive-power band for an IV
pub fn iv_strength(iv: f64) -> &'static str {
    if iv < NEGLIGIBLE_IV {
        "Negligible"
    } else if iv < 0.1 {
        "Weak"
    } else if iv < 0.3 {
        "Medium"
    } else if iv < 0.5 {
        "Strong"
    } else {
        "Suspicious"
    }
}

/// One line of the summary
#[derive(Debug, Clone, PartialEq)]
pub struct IvSummaryEntry {
    pub column: String,
    /// Number of distinct categories, when a table was built
    pub categories: Option<usize>,
    pub iv: f64,
}

/// IV per input column, in input order
#[derive(Debug, Default)]
pub struct IvSummary {
    pub entries: Vec<IvSummaryEntry>,
}

impl IvSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_model(model: &WoeModel) -> Self {
        let entries = model
            .tables()
            .iter()
            .map(|t| IvSummaryEntry {
                column: t.input_column().to_string(),
                categories: Some(t.table().len()),
                iv: t.information_value(),
            })
            .collect();
        Self { entries }
    }

    pub fn add(&mut self, column: impl Into<String>, categories: Option<usize>, iv: f64) {
        self.entries.push(IvSummaryEntry {
            column: column.into(),
            categories,
            iv,
        });
    }

    /// Columns whose IV is below the negligible threshold
    pub fn negligible_columns(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.iv < NEGLIGIBLE_IV)
            .map(|e| e.column.as_str())
            .collect()
    }

    /// Build the comfy-table rendering
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Column").add_attribute(Attribute::Bold),
            Cell::new("Categories").add_attribute(Attribute::Bold),
            Cell::new("IV").add_attribute(Attribute::Bold),
            Cell::new("Strength").add_attribute(Attribute::Bold),
        ]);

        for entry in &self.entries {
            let color = if entry.iv < NEGLIGIBLE_IV {
                Color::Red
            } else if entry.iv < 0.1 {
                Color::Yellow
            } else {
                Color::Green
            };

            table.add_row(vec![
                Cell::new(&entry.column),
                Cell::new(
                    entry
                        .categories
                        .map(|n| n.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                ),
                Cell::new(format!("{:.4}", entry.iv)).fg(color),
                Cell::new(iv_strength(entry.iv)).fg(color),
            ]);
        }

        table
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("INFORMATION VALUE").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        // Indent the table
        for line in self.table().to_string().lines() {
            println!("    {}", line);
        }

        let negligible = self.negligible_columns();
        if !negligible.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Negligible IV").yellow(),
                style(format!("(<{:.2})", NEGLIGIBLE_IV)).dim()
            );
            for column in negligible {
                println!("        {} {}", style("•").dim(), column);
            }
        }
    }
}
