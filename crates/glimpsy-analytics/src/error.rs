//! Error types for the analytics pipeline.
//!
//! Data-shape anomalies never surface here: a malformed cell is excluded
//! from aggregates, a missing column makes a filter vacuous and an empty
//! input yields `None`. Errors are reserved for bad configuration and
//! malformed filter requests.

use glimpsy_core::CoreError;
use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur while configuring or driving the pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// A pipeline threshold is out of range.
    #[error("Invalid pipeline config: {reason}")]
    InvalidConfig {
        /// Why the config was rejected.
        reason: String,
    },

    /// A filter request could not be interpreted.
    #[error("Invalid filter request: {reason}")]
    InvalidFilterRequest {
        /// Why the request was rejected.
        reason: String,
    },

    /// A numeric bound in a filter request is not a number.
    #[error("Invalid bound '{bound}' for column '{column}': {value}")]
    InvalidBound {
        /// Column the bound applies to.
        column: String,
        /// `min` or `max`.
        bound: String,
        /// The offending value as received.
        value: String,
    },

    /// Unknown chart kind.
    #[error("Unknown chart kind: {kind}")]
    UnknownChartKind {
        /// The kind as given.
        kind: String,
    },

    /// Error from the data model.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl AnalyticsError {
    /// Create an invalid config error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid filter request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidFilterRequest {
            reason: reason.into(),
        }
    }

    /// Create an invalid bound error.
    #[must_use]
    pub fn invalid_bound(
        column: impl Into<String>,
        bound: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidBound {
            column: column.into(),
            bound: bound.into(),
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::invalid_bound("principal_amount", "min", "\"abc\"");
        let msg = err.to_string();
        assert!(msg.contains("principal_amount"));
        assert!(msg.contains("min"));

        let err = AnalyticsError::invalid_config("page_size must be positive");
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_core_error_passthrough() {
        let err: AnalyticsError = CoreError::EmptyColumnName.into();
        assert_eq!(err.to_string(), CoreError::EmptyColumnName.to_string());
    }
}
