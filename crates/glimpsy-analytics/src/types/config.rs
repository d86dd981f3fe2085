//! Configuration for the analytics pipeline.

use crate::error::{AnalyticsError, AnalyticsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a date range is matched when a dataset has several date columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateMatch {
    /// Keep a row if any of its date fields falls inside the range.
    #[default]
    Any,
    /// Keep a row only if every date field it carries falls inside the range.
    All,
}

impl fmt::Display for DateMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "any"),
            Self::All => write!(f, "all"),
        }
    }
}

impl FromStr for DateMatch {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            other => Err(AnalyticsError::invalid_config(format!(
                "date match must be 'any' or 'all', got '{other}'"
            ))),
        }
    }
}

/// Thresholds and switches used throughout the pipeline.
///
/// Every field has a default matching the dashboard's behaviour, so a
/// partially specified JSON object deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Rows inspected per column when classifying.
    pub sample_size: usize,

    /// A column is numerical when more than this share of samples parse.
    pub numeric_ratio: f64,

    /// A column is categorical when its unique share is below this.
    pub unique_ratio: f64,

    /// Upper bound on distinct values for a categorical column.
    pub max_categorical_uniques: usize,

    /// Case-insensitive substrings that mark a column as a date.
    pub date_keywords: Vec<String>,

    /// Categorical filters with more options than this are not offered.
    pub max_filter_options: usize,

    /// Numeric columns reported in comparisons and overviews.
    pub comparison_columns: usize,

    /// Rows per table page.
    pub page_size: usize,

    /// Date range semantics across several date columns.
    pub date_match: DateMatch,

    /// Enable parallel processing (requires 'parallel' feature).
    pub parallel: bool,

    /// Minimum row count to trigger parallel processing.
    pub parallel_threshold: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sample_size: 100,
            numeric_ratio: 0.8,
            unique_ratio: 0.3,
            max_categorical_uniques: 50,
            date_keywords: ["date", "time", "created", "updated"]
                .iter()
                .map(|k| (*k).to_string())
                .collect(),
            max_filter_options: 100,
            comparison_columns: 3,
            page_size: 10,
            date_match: DateMatch::Any,
            parallel: true,
            parallel_threshold: 1000,
        }
    }
}

impl PipelineConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the classification sample size.
    #[must_use]
    pub fn with_sample_size(mut self, size: usize) -> Self {
        self.sample_size = size;
        self
    }

    /// Sets the numeric ratio threshold.
    #[must_use]
    pub fn with_numeric_ratio(mut self, ratio: f64) -> Self {
        self.numeric_ratio = ratio;
        self
    }

    /// Sets the unique ratio threshold.
    #[must_use]
    pub fn with_unique_ratio(mut self, ratio: f64) -> Self {
        self.unique_ratio = ratio;
        self
    }

    /// Sets the maximum distinct values for a categorical column.
    #[must_use]
    pub fn with_max_categorical_uniques(mut self, max: usize) -> Self {
        self.max_categorical_uniques = max;
        self
    }

    /// Replaces the date keywords.
    #[must_use]
    pub fn with_date_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the categorical filter option cutoff.
    #[must_use]
    pub fn with_max_filter_options(mut self, max: usize) -> Self {
        self.max_filter_options = max;
        self
    }

    /// Sets how many numeric columns comparisons report.
    #[must_use]
    pub fn with_comparison_columns(mut self, count: usize) -> Self {
        self.comparison_columns = count;
        self
    }

    /// Sets the table page size.
    #[must_use]
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Sets the date match mode.
    #[must_use]
    pub fn with_date_match(mut self, mode: DateMatch) -> Self {
        self.date_match = mode;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// True if the column name contains one of the date keywords.
    #[must_use]
    pub fn is_date_name(&self, column: &str) -> bool {
        let lower = column.to_lowercase();
        self.date_keywords
            .iter()
            .any(|k| !k.is_empty() && lower.contains(&k.to_lowercase()))
    }

    /// Checks that every threshold is in range.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.sample_size == 0 {
            return Err(AnalyticsError::invalid_config("sample_size must be positive"));
        }
        if self.page_size == 0 {
            return Err(AnalyticsError::invalid_config("page_size must be positive"));
        }
        for (name, ratio) in [
            ("numeric_ratio", self.numeric_ratio),
            ("unique_ratio", self.unique_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(AnalyticsError::invalid_config(format!(
                    "{name} must be between 0 and 1, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}
