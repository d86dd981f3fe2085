//! Adjust command implementation.
//!
//! Shifts every CD rate by a number of basis points and recomputes the
//! derived interest, total value and APY columns.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tabled::Tabled;

use glimpsy_analytics::{recalculate, summarize, RateAdjustment, RateFields};
use glimpsy_core::Dataset;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_number, print_header, print_output, print_success, print_single};
use crate::source::{load_dataset, save_dataset};

/// Arguments for the adjust command.
#[derive(Args, Debug)]
pub struct AdjustArgs {
    /// Dataset file (.json or .csv) with principal, rate and term columns
    pub dataset: PathBuf,

    /// Rate shift in basis points, e.g. 25 or -50
    #[arg(long, allow_hyphen_values = true)]
    pub bps: i32,

    /// Write the adjusted rows to a .csv or .json file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(serde::Serialize, Tabled)]
struct ImpactRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Original")]
    original: String,
    #[tabled(rename = "Adjusted")]
    adjusted: String,
}

#[derive(serde::Serialize)]
struct Impact {
    adjustment: String,
    bps: i32,
    rows: usize,
    avg_rate_original: Option<f64>,
    avg_rate_adjusted: Option<f64>,
    interest_earned_original: Option<f64>,
    interest_earned_adjusted: Option<f64>,
    total_value_original: Option<f64>,
    total_value_adjusted: Option<f64>,
}

fn column_avg(dataset: &Dataset, column: &str, ctx: &Context) -> Option<f64> {
    summarize(dataset.rows(), column, ctx.pipeline()).map(|s| s.avg)
}

fn column_sum(dataset: &Dataset, column: &str, ctx: &Context) -> Option<f64> {
    summarize(dataset.rows(), column, ctx.pipeline()).map(|s| s.sum)
}

/// Execute the adjust command.
pub fn execute(args: AdjustArgs, ctx: &Context) -> Result<()> {
    let dataset = load_dataset(&args.dataset)?;
    let fields = RateFields::default();
    if !fields.applies_to(&dataset) {
        bail!(
            "Rate adjustment needs the columns {}, {} and {}",
            fields.principal,
            fields.rate,
            fields.term
        );
    }

    let adjustment = RateAdjustment::new(args.bps);
    let adjusted = recalculate(&dataset, adjustment, &fields, ctx.pipeline());

    if let Some(out) = &args.out {
        save_dataset(out, "adjusted", &adjusted)?;
        print_success(&format!(
            "Wrote {} rows adjusted by {} to {}",
            adjusted.row_count(),
            adjustment,
            out.display()
        ));
        return Ok(());
    }

    let impact = Impact {
        adjustment: adjustment.to_string(),
        bps: adjustment.bps(),
        rows: adjusted.row_count(),
        avg_rate_original: column_avg(&dataset, &fields.rate, ctx),
        avg_rate_adjusted: column_avg(&adjusted, &fields.rate, ctx),
        interest_earned_original: column_sum(&dataset, &fields.interest_earned, ctx),
        interest_earned_adjusted: column_sum(&adjusted, &fields.interest_earned, ctx),
        total_value_original: column_sum(&dataset, &fields.total_value, ctx),
        total_value_adjusted: column_sum(&adjusted, &fields.total_value, ctx),
    };

    if ctx.format != OutputFormat::Table {
        return print_single(&impact, ctx.format);
    }

    let precision = ctx.precision();
    let shown = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format_number(v, precision));
    let rows = vec![
        ImpactRow {
            metric: "Average rate (%)",
            original: shown(impact.avg_rate_original),
            adjusted: shown(impact.avg_rate_adjusted),
        },
        ImpactRow {
            metric: "Total interest earned",
            original: shown(impact.interest_earned_original),
            adjusted: shown(impact.interest_earned_adjusted),
        },
        ImpactRow {
            metric: "Total value",
            original: shown(impact.total_value_original),
            adjusted: shown(impact.total_value_adjusted),
        },
    ];
    print_header(&format!("Rate Adjustment ({adjustment})"));
    print_output(&rows, ctx.format)
}
