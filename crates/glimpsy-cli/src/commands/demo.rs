//! Demo command implementation.
//!
//! Generates one of the seeded demo datasets. The same arguments always
//! produce the same rows.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use glimpsy_analytics::{DemoDataset, Paginator};

use crate::cli::OutputFormat;
use crate::commands::{parse_date, Context};
use crate::output::{print_info, print_rows, print_success};
use crate::source::save_dataset;

/// Arguments for the demo command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Fixture to generate (finance, sales, health)
    #[arg(default_value = "finance")]
    pub dataset: String,

    /// Row count (defaults to the fixture's size)
    #[arg(short, long)]
    pub rows: Option<usize>,

    /// Reference date for the finance book (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    pub today: Option<String>,

    /// Write the rows to a .csv or .json file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Execute the demo command.
pub fn execute(args: DemoArgs, ctx: &Context) -> Result<()> {
    let fixture: DemoDataset = args.dataset.parse()?;
    let today = match &args.today {
        Some(date) => parse_date(date)?,
        None => chrono::Utc::now().date_naive(),
    };

    let dataset = fixture.generate(args.rows, today);
    info!(fixture = %fixture, rows = dataset.row_count(), "generated demo dataset");

    if let Some(out) = &args.out {
        save_dataset(out, &format!("{fixture} demo"), &dataset)?;
        print_success(&format!(
            "Wrote {} {} rows to {}",
            dataset.row_count(),
            fixture,
            out.display()
        ));
        return Ok(());
    }

    match ctx.format {
        OutputFormat::Table => {
            let page = Paginator::new(ctx.pipeline().page_size).page(dataset.rows(), 1);
            print_rows(dataset.columns(), &page.rows, ctx.format)?;
            print_info(&page.caption());
            Ok(())
        }
        _ => print_rows(dataset.columns(), dataset.rows(), ctx.format),
    }
}
