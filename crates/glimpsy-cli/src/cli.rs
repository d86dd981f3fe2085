//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use glimpsy_config::FormatPreference;

use crate::commands::{
    AdjustArgs, ChartArgs, ClassifyArgs, CompareArgs, ConfigArgs, DemoArgs, FilterArgs,
    FiltersArgs, SearchArgs, SummaryArgs,
};

/// Glimpsy - explore, filter and compare tabular datasets
#[derive(Parser)]
#[command(name = "glimpsy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Log pipeline decisions to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, env = "GLIMPSY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Classify every column as date, numerical, categorical or text
    Classify(ClassifyArgs),

    /// Show the filter controls a dataset offers
    Filters(FiltersArgs),

    /// Apply filters and show the surviving rows
    Filter(FilterArgs),

    /// Summarize a numeric column, or the whole dataset
    Summary(SummaryArgs),

    /// Compare two datasets
    Compare(CompareArgs),

    /// Recalculate CD metrics under a rate adjustment
    Adjust(AdjustArgs),

    /// Prepare a chart series
    Chart(ChartArgs),

    /// Search rows and page through the results
    Search(SearchArgs),

    /// Generate a demo dataset
    Demo(DemoArgs),

    /// Manage settings
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

impl From<FormatPreference> for OutputFormat {
    fn from(pref: FormatPreference) -> Self {
        match pref {
            FormatPreference::Table => Self::Table,
            FormatPreference::Json => Self::Json,
            FormatPreference::Csv => Self::Csv,
            FormatPreference::Minimal => Self::Minimal,
        }
    }
}
