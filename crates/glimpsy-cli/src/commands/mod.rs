//! CLI command implementations.

pub mod adjust;
pub mod chart;
pub mod classify;
pub mod compare;
pub mod config;
pub mod demo;
pub mod filter;
pub mod search;
pub mod summary;

pub use adjust::AdjustArgs;
pub use chart::ChartArgs;
pub use classify::{ClassifyArgs, FiltersArgs};
pub use compare::CompareArgs;
pub use config::ConfigArgs;
pub use demo::DemoArgs;
pub use filter::FilterArgs;
pub use search::SearchArgs;
pub use summary::SummaryArgs;

use chrono::NaiveDate;
use glimpsy_analytics::PipelineConfig;
use glimpsy_config::{ConfigStore, Settings};
use glimpsy_core::value::parse_number;
use glimpsy_core::Dataset;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};

/// Everything a command needs besides its own arguments.
pub struct Context {
    /// Resolved output format.
    pub format: OutputFormat,
    /// Loaded user settings.
    pub settings: Settings,
    /// Where settings live.
    pub store: ConfigStore,
}

impl Context {
    /// Pipeline thresholds from the settings.
    pub fn pipeline(&self) -> &PipelineConfig {
        &self.settings.pipeline
    }

    /// Decimal places for displayed numbers.
    pub fn precision(&self) -> u8 {
        self.settings.decimal_precision
    }
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Splits `column=value`.
pub fn parse_assignment(s: &str) -> CliResult<(String, String)> {
    match s.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(CliError::InvalidAssignment(s.to_string())),
    }
}

/// Splits `column=number`.
pub fn parse_bound(s: &str) -> CliResult<(String, f64)> {
    let (column, value) = parse_assignment(s)?;
    let number = parse_number(&value).ok_or_else(|| CliError::InvalidNumber {
        column: column.clone(),
        value,
    })?;
    Ok((column, number))
}

/// Fails if the dataset lacks a column.
pub fn require_column(dataset: &Dataset, column: &str) -> CliResult<()> {
    if dataset.has_column(column) {
        Ok(())
    } else {
        Err(CliError::UnknownColumn(column.to_string()))
    }
}
