//! Filter command implementation.
//!
//! Builds a filter request from a JSON file and/or flags, resolves it
//! against the dataset and prints the filter statistics and surviving rows.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::debug;

use glimpsy_analytics::{
    build_templates, classify, filter_dataset, FilterRequest, FilterSet, FilterStats, Paginator,
};
use glimpsy_core::Dataset;

use crate::cli::OutputFormat;
use crate::commands::{parse_assignment, parse_bound, parse_date, Context};
use crate::output::{
    format_percent, print_metrics, print_rows, print_success, print_info, KeyValue,
};
use crate::source::save_dataset;

/// Arguments for the filter command.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Dataset file (.json or .csv)
    pub dataset: PathBuf,

    /// Start of the date window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub start: Option<String>,

    /// End of the date window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub end: Option<String>,

    /// Filter request JSON file; flags override its entries
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Allowed values, e.g. --where status=Active,Matured (repeatable)
    #[arg(long = "where", value_name = "COLUMN=VALUES")]
    pub where_values: Vec<String>,

    /// Inclusive lower bound, e.g. --min principal_amount=50000 (repeatable)
    #[arg(long, value_name = "COLUMN=NUMBER")]
    pub min: Vec<String>,

    /// Inclusive upper bound, e.g. --max term_months=24 (repeatable)
    #[arg(long, value_name = "COLUMN=NUMBER")]
    pub max: Vec<String>,

    /// Keep a column's filter but switch it off (repeatable)
    #[arg(long, value_name = "COLUMN")]
    pub disable: Vec<String>,

    /// Page of rows to show
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Write the surviving rows to a .csv or .json file instead of printing them
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

fn build_request(args: &FilterArgs) -> Result<FilterRequest> {
    let mut request = match &args.request {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            FilterRequest::from_json(&content)?
        }
        None => FilterRequest::new(),
    };

    for date in [&args.start, &args.end].into_iter().flatten() {
        parse_date(date)?;
    }
    if args.start.is_some() || args.end.is_some() {
        let start = args.start.as_deref().or(request.start_date()).map(str::to_string);
        let end = args.end.as_deref().or(request.end_date()).map(str::to_string);
        request = request.with_date_range(start.as_deref(), end.as_deref());
    }

    for assignment in &args.where_values {
        let (column, values) = parse_assignment(assignment)?;
        let values: Vec<&str> = values.split(',').map(str::trim).collect();
        request = request.with_values(&column, values);
    }

    let mut bounds: BTreeMap<String, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for bound in &args.min {
        let (column, value) = parse_bound(bound)?;
        bounds.entry(column).or_default().0 = Some(value);
    }
    for bound in &args.max {
        let (column, value) = parse_bound(bound)?;
        bounds.entry(column).or_default().1 = Some(value);
    }
    for (column, (min, max)) in bounds {
        request = request.with_bounds(&column, min, max);
    }

    Ok(request)
}

fn resolve_filters(args: &FilterArgs, dataset: &Dataset, ctx: &Context) -> Result<FilterSet> {
    let request = build_request(args)?;
    let types = classify(dataset, ctx.pipeline());
    let date_fields = build_templates(dataset, &types, ctx.pipeline()).date_fields();
    let mut filters = request.resolve(dataset, &date_fields, ctx.pipeline())?;

    for column in &args.disable {
        for descriptor in filters.descriptors.iter_mut().filter(|d| &d.column == column) {
            descriptor.enabled = false;
        }
    }
    debug!(
        descriptors = filters.descriptors.len(),
        identity = filters.is_identity(),
        "resolved filters"
    );
    Ok(filters)
}

/// Execute the filter command.
pub fn execute(args: FilterArgs, ctx: &Context) -> Result<()> {
    let dataset = crate::source::load_dataset(&args.dataset)?;
    let filters = resolve_filters(&args, &dataset, ctx)?;
    let filtered = filter_dataset(&dataset, &filters, ctx.pipeline());
    let stats = FilterStats::new(dataset.row_count(), filtered.row_count());

    if let Some(out) = &args.out {
        save_dataset(out, "filtered", &filtered)?;
        print_success(&format!(
            "Wrote {} of {} rows to {}",
            stats.filtered,
            stats.total,
            out.display()
        ));
        return Ok(());
    }

    let page = Paginator::new(ctx.pipeline().page_size).page(filtered.rows(), args.page);
    match ctx.format {
        OutputFormat::Table => {
            let metrics = vec![
                KeyValue::new("Total rows", stats.total.to_string()),
                KeyValue::new("Filtered rows", stats.filtered.to_string()),
                KeyValue::new("Filtered out", stats.filtered_out.to_string()),
                KeyValue::new("Kept", format_percent(stats.filtered_pct, ctx.precision())),
            ];
            print_metrics("Filter Results", &metrics, ctx.format)?;
            print_rows(filtered.columns(), &page.rows, ctx.format)?;
            print_info(&format!("{} (page {} of {})", page.caption(), page.number, page.page_count));
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "stats": stats,
                "filters": FilterRequest::from_filter_set(&filters),
                "page": page,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Csv => print_rows(filtered.columns(), filtered.rows(), ctx.format)?,
        OutputFormat::Minimal => println!("{}", stats.filtered),
    }

    Ok(())
}
