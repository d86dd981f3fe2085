//! Chart command implementation.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use tabled::Tabled;

use glimpsy_analytics::{prepare_series, ChartKind, ChartRequest, RateFields};

use crate::cli::OutputFormat;
use crate::commands::{require_column, Context};
use crate::output::{format_number, print_header, print_output, print_single};
use crate::source::load_dataset;

/// Arguments for the chart command.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Dataset file (.json or .csv)
    pub dataset: PathBuf,

    /// Chart kind (line, bar, pie, doughnut, scatter, histogram)
    #[arg(short, long, default_value = "bar")]
    pub kind: String,

    /// X column (the value column for histograms)
    #[arg(short, long)]
    pub x: String,

    /// Y column; required except for histograms
    #[arg(short, long)]
    pub y: Option<String>,

    /// Histogram bucket count
    #[arg(long, default_value = "10")]
    pub bins: usize,
}

#[derive(serde::Serialize, Tabled)]
struct PointRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Execute the chart command.
pub fn execute(args: ChartArgs, ctx: &Context) -> Result<()> {
    let kind: ChartKind = args.kind.parse()?;
    let dataset = load_dataset(&args.dataset)?;
    require_column(&dataset, &args.x)?;

    let y = match (&args.y, kind) {
        (Some(y), _) => {
            require_column(&dataset, y)?;
            y.clone()
        }
        (None, ChartKind::Histogram) => String::new(),
        (None, _) => bail!("A {kind} chart needs a y column (--y)"),
    };

    let fields = RateFields::default();
    let request = ChartRequest::new(kind, &args.x, y)
        .averaging(&[fields.rate.as_str()])
        .with_bins(args.bins);
    let series = prepare_series(dataset.rows(), &request);

    match ctx.format {
        OutputFormat::Json | OutputFormat::Minimal => print_single(&series, ctx.format),
        OutputFormat::Table | OutputFormat::Csv => {
            let precision = ctx.precision();
            let rows: Vec<PointRow> = series
                .points
                .iter()
                .map(|p| PointRow {
                    label: p.label.clone(),
                    value: format_number(p.value, precision),
                })
                .collect();
            if ctx.format == OutputFormat::Table {
                let title = match &series.y_column {
                    Some(y) => format!("{} chart of {} by {}", series.kind, y, series.x_column),
                    None => format!("{} chart of {}", series.kind, series.x_column),
                };
                print_header(&title);
            }
            print_output(&rows, ctx.format)
        }
    }
}
