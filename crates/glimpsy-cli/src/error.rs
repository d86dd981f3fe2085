//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// A `column=value` argument without `=` or column.
    #[error("Invalid assignment: {0}. Use column=value.")]
    InvalidAssignment(String),

    /// A bound that is not a number.
    #[error("Invalid number for {column}: {value}")]
    InvalidNumber {
        /// Column the bound applies to.
        column: String,
        /// The rejected text.
        value: String,
    },

    /// File extension the loader does not handle.
    #[error("Unsupported dataset file: {0}. Use .json or .csv.")]
    UnsupportedFile(PathBuf),

    /// Dataset payload is not usable.
    #[error("Invalid dataset: {0}")]
    Dataset(String),

    /// Column not present in the dataset.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
