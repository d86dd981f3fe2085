//! Error types for the Glimpsy data model.
//!
//! Only construction-time invariant violations are errors. Malformed cells,
//! missing columns and empty inputs are handled by the analytics layer as
//! "no constraint" or "no data", never as failures.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or decoding datasets.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Declared row count does not match the number of rows supplied.
    #[error("Row count mismatch: declared {declared}, found {actual}")]
    RowCountMismatch {
        /// Row count claimed by the source.
        declared: usize,
        /// Rows actually present.
        actual: usize,
    },

    /// A column name appears more than once in the column list.
    #[error("Duplicate column: {column}")]
    DuplicateColumn {
        /// The repeated column name.
        column: String,
    },

    /// A column name is empty or whitespace.
    #[error("Column names must not be empty")]
    EmptyColumnName,

    /// Source payload could not be decoded.
    #[error("Invalid dataset payload: {reason}")]
    InvalidPayload {
        /// Description of the decoding failure.
        reason: String,
    },
}

impl CoreError {
    /// Create a duplicate column error.
    #[must_use]
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }

    /// Create an invalid payload error.
    #[must_use]
    pub fn invalid_payload(reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_payload(err.to_string())
    }
}
