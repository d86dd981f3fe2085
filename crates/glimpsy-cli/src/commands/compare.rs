//! Compare command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::Tabled;

use glimpsy_analytics::chart::{histogram, numeric_values};
use glimpsy_analytics::compare;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{
    format_number, format_percent, print_header, print_metrics, print_output, print_single,
    KeyValue,
};
use crate::source::load_dataset;

/// Arguments for the compare command.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// First dataset file (.json or .csv)
    pub first: PathBuf,

    /// Second dataset file (.json or .csv)
    pub second: PathBuf,

    /// Show histograms of the first shared numeric column with this many bins
    #[arg(long)]
    pub bins: Option<usize>,
}

#[derive(serde::Serialize, Tabled)]
struct DeltaRow {
    #[tabled(rename = "Column")]
    column: String,
    #[tabled(rename = "Avg A")]
    avg_a: String,
    #[tabled(rename = "Avg B")]
    avg_b: String,
    #[tabled(rename = "Difference")]
    difference: String,
    #[tabled(rename = "Change")]
    change: String,
}

#[derive(serde::Serialize, Tabled)]
struct BinRow {
    #[tabled(rename = "Dataset")]
    dataset: &'static str,
    #[tabled(rename = "Bin")]
    label: String,
    #[tabled(rename = "Count")]
    count: usize,
}

fn pct_or_dash(value: Option<f64>, precision: u8) -> String {
    value.map_or_else(|| "-".to_string(), |v| format_percent(v, precision))
}

/// Execute the compare command.
pub fn execute(args: CompareArgs, ctx: &Context) -> Result<()> {
    let a = load_dataset(&args.first)?;
    let b = load_dataset(&args.second)?;
    let report = compare(&a, &b, ctx.pipeline());
    let precision = ctx.precision();

    let deltas: Vec<DeltaRow> = report
        .column_deltas
        .iter()
        .map(|d| DeltaRow {
            column: d.column.clone(),
            avg_a: format_number(d.avg_a, precision),
            avg_b: format_number(d.avg_b, precision),
            difference: format_number(d.difference, precision),
            change: pct_or_dash(d.difference_pct, precision),
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {}
        OutputFormat::Csv => return print_output(&deltas, ctx.format),
        OutputFormat::Json | OutputFormat::Minimal => return print_single(&report, ctx.format),
    }

    let metrics = vec![
        KeyValue::new("Rows A", report.row_count_a.to_string()),
        KeyValue::new("Rows B", report.row_count_b.to_string()),
        KeyValue::new("Row delta", report.row_count_delta.to_string()),
        KeyValue::new("Row change", pct_or_dash(report.row_count_delta_pct, precision)),
        KeyValue::new("Common columns", report.common_columns.join(", ")),
        KeyValue::new("Only in A", report.only_in_a.join(", ")),
        KeyValue::new("Only in B", report.only_in_b.join(", ")),
    ];
    print_metrics("Dataset Comparison", &metrics, ctx.format)?;

    if !deltas.is_empty() {
        print_header("Column Averages");
        print_output(&deltas, ctx.format)?;
    }

    if let (Some(bins), Some(column)) = (args.bins, report.histogram_column()) {
        let rows: Vec<BinRow> = [("A", &a), ("B", &b)]
            .into_iter()
            .flat_map(|(name, dataset)| {
                histogram(&numeric_values(dataset.rows(), column), bins)
                    .into_iter()
                    .map(move |point| BinRow {
                        dataset: name,
                        label: point.label,
                        count: point.value as usize,
                    })
            })
            .collect();
        print_header(&format!("Distribution of {column}"));
        print_output(&rows, ctx.format)?;
    }

    Ok(())
}
