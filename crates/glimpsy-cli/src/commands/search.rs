//! Search command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use glimpsy_analytics::{search, Paginator};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{print_info, print_rows, print_single};
use crate::source::load_dataset;

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Dataset file (.json or .csv)
    pub dataset: PathBuf,

    /// Text to look for in any cell, ignoring case
    pub term: String,

    /// Page of matches to show
    #[arg(long, default_value = "1")]
    pub page: usize,
}

/// Execute the search command.
pub fn execute(args: SearchArgs, ctx: &Context) -> Result<()> {
    let dataset = load_dataset(&args.dataset)?;
    let matches = search(dataset.rows(), &args.term);
    let page = Paginator::new(ctx.pipeline().page_size).page(&matches, args.page);

    match ctx.format {
        OutputFormat::Json => print_single(&page, ctx.format),
        OutputFormat::Csv => print_rows(dataset.columns(), &matches, ctx.format),
        OutputFormat::Minimal => {
            println!("{}", matches.len());
            Ok(())
        }
        OutputFormat::Table => {
            print_rows(dataset.columns(), &page.rows, ctx.format)?;
            print_info(&format!(
                "{} (page {} of {})",
                page.caption(),
                page.number,
                page.page_count
            ));
            Ok(())
        }
    }
}
