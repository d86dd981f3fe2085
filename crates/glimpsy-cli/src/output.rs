//! Output formatting utilities.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use glimpsy_core::Row;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;
use crate::source::write_csv;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppresses headers and status messages.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a single result.
pub fn print_single<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Minimal => {
            println!("{}", serde_json::to_string(data)?);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            wtr.serialize(data)?;
            wtr.flush()?;
        }
    }
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints minimal output (first value only).
fn print_minimal<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    if let Some(first) = data.first() {
        println!("{}", serde_json::to_string(first)?);
    }
    Ok(())
}

/// Prints dataset rows under the given columns.
///
/// Minimal output prints the row count only.
pub fn print_rows(columns: &[String], rows: &[Row], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No rows.");
                return Ok(());
            }
            let mut builder = Builder::default();
            builder.push_record(columns.iter().cloned());
            for row in rows {
                builder.push_record(columns.iter().map(|c| row.display(c)));
            }
            let table = builder.build().with(Style::rounded()).to_string();
            println!("{}", table);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => write_csv(io::stdout(), columns, rows)?,
        OutputFormat::Minimal => println!("{}", rows.len()),
    }
    Ok(())
}

/// Formats a number with a fixed number of decimals.
pub fn format_number(value: f64, precision: u8) -> String {
    format!("{:.prec$}", value, prec = usize::from(precision))
}

/// Formats a percentage value.
pub fn format_percent(value: f64, precision: u8) -> String {
    format!("{}%", format_number(value, precision))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    if !is_quiet() {
        println!("{} {}", "✓".green(), message);
    }
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    if !is_quiet() {
        println!("{} {}", "ℹ".blue(), message);
    }
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Creates a key-value pair from a number.
    pub fn from_number(key: impl Into<String>, value: f64, precision: u8) -> Self {
        Self::new(key, format_number(value, precision))
    }
}

/// Prints key-value pairs; JSON output becomes one object.
pub fn print_metrics(title: &str, metrics: &[KeyValue], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            print_header(title);
            print_output(metrics, format)
        }
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = metrics
                .iter()
                .map(|kv| (kv.key.clone(), serde_json::Value::String(kv.value.clone())))
                .collect();
            println!("{}", serde_json::to_string_pretty(&object)?);
            Ok(())
        }
        OutputFormat::Csv => print_output(metrics, format),
        OutputFormat::Minimal => {
            for kv in metrics {
                println!("{}={}", kv.key, kv.value);
            }
            Ok(())
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    if !is_quiet() {
        println!("\n{}", title.bold().underline());
    }
}
