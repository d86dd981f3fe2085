//! Glimpsy CLI - explore, filter and compare tabular datasets.
//!
//! # Usage
//!
//! ```bash
//! # Generate the demo CD book
//! glimpsy demo finance --out cds.csv
//!
//! # See how columns are classified and which filters they offer
//! glimpsy classify cds.csv
//! glimpsy filters cds.csv
//!
//! # Filter by date window, category and numeric bounds
//! glimpsy filter cds.csv --start 2024-01-01 --where status=Active --min principal_amount=50000
//!
//! # Shift every rate by 25 basis points
//! glimpsy adjust cds.csv --bps 25
//!
//! # Compare two datasets
//! glimpsy compare before.csv after.csv --bins 5
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod source;

use cli::{Cli, Commands};
use commands::Context;
use error::{CliError, CliResult};
use glimpsy_config::{ConfigStore, Settings};

fn init_tracing(verbose: bool, quiet: bool) {
    let directive = if verbose {
        "glimpsy=debug"
    } else if quiet {
        "glimpsy=error"
    } else {
        "glimpsy=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Get the config file path.
fn config_path() -> CliResult<PathBuf> {
    let home = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CliError::Config("could not determine config directory".into()))?;
    Ok(home.join("glimpsy").join("config.json"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    output::set_quiet(cli.quiet);

    let store = match cli.config {
        Some(path) => ConfigStore::new(path),
        None => ConfigStore::new(config_path()?),
    };
    let settings = store.load().unwrap_or_else(|err| {
        warn!(path = %store.path().display(), error = %err, "ignoring unreadable settings");
        Settings::default()
    });

    let ctx = Context {
        format: cli.format.unwrap_or_else(|| settings.default_format.into()),
        settings,
        store,
    };

    match cli.command {
        Commands::Classify(args) => commands::classify::execute(args, &ctx)?,
        Commands::Filters(args) => commands::classify::execute_filters(args, &ctx)?,
        Commands::Filter(args) => commands::filter::execute(args, &ctx)?,
        Commands::Summary(args) => commands::summary::execute(args, &ctx)?,
        Commands::Compare(args) => commands::compare::execute(args, &ctx)?,
        Commands::Adjust(args) => commands::adjust::execute(args, &ctx)?,
        Commands::Chart(args) => commands::chart::execute(args, &ctx)?,
        Commands::Search(args) => commands::search::execute(args, &ctx)?,
        Commands::Demo(args) => commands::demo::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}
