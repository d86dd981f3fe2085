//! Summary command implementation.
//!
//! Summarizes one numeric column, or gives a dataset overview when no
//! column is named.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use glimpsy_analytics::{overview, summarize};

use crate::cli::OutputFormat;
use crate::commands::{require_column, Context};
use crate::output::{print_metrics, print_single, print_warning, KeyValue};
use crate::source::load_dataset;

/// Arguments for the summary command.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Dataset file (.json or .csv)
    pub dataset: PathBuf,

    /// Numeric column to summarize
    #[arg(short, long)]
    pub column: Option<String>,
}

/// Execute the summary command.
pub fn execute(args: SummaryArgs, ctx: &Context) -> Result<()> {
    let dataset = load_dataset(&args.dataset)?;
    let precision = ctx.precision();

    let Some(column) = args.column else {
        let overview = overview(&dataset, ctx.pipeline());
        if matches!(ctx.format, OutputFormat::Json | OutputFormat::Minimal) {
            return print_single(&overview, ctx.format);
        }
        let mut metrics = vec![
            KeyValue::new("Rows", overview.row_count.to_string()),
            KeyValue::new("Columns", overview.column_count.to_string()),
            KeyValue::new("Numeric columns", overview.numeric_columns.join(", ")),
        ];
        metrics.extend(
            overview
                .highlights
                .iter()
                .map(|h| KeyValue::from_number(format!("Avg {}", h.column), h.avg, precision)),
        );
        return print_metrics("Dataset Overview", &metrics, ctx.format);
    };

    require_column(&dataset, &column)?;
    let Some(summary) = summarize(dataset.rows(), &column, ctx.pipeline()) else {
        print_warning(&format!("No numeric data in column '{column}'"));
        if ctx.format == OutputFormat::Json {
            println!("null");
        }
        return Ok(());
    };

    let metrics = vec![
        KeyValue::new("Column", column.clone()),
        KeyValue::new("Count", summary.count.to_string()),
        KeyValue::from_number("Min", summary.min, precision),
        KeyValue::from_number("Max", summary.max, precision),
        KeyValue::from_number("Avg", summary.avg, precision),
        KeyValue::from_number("Sum", summary.sum, precision),
    ];
    match ctx.format {
        OutputFormat::Json => print_single(&summary, ctx.format),
        _ => print_metrics("Column Summary", &metrics, ctx.format),
    }
}
