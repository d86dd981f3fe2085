//! Rate adjustment of CD-style rows.
//!
//! Shifting every row's base rate by a number of basis points and
//! recomputing what depends on it:
//!
//! ```text
//! rate     = max(0.001, R + A / 100)
//! interest = P * rate * (T / 12) / 100
//! total    = P + interest
//! apy      = (1 + rate / 100)^12 - 1
//! ```
//!
//! The APY exponent is 12 whatever the term. Recalculation always starts
//! from the base rows, so applying the same adjustment twice gives the same
//! result.

use crate::error::AnalyticsError;
use crate::parallel::maybe_parallel_map;
use crate::types::PipelineConfig;
use glimpsy_core::{Dataset, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Floor applied to adjusted rates, in percent.
pub const MIN_RATE: f64 = 0.001;

/// Compounding periods used for APY.
pub const APY_PERIODS: i32 = 12;

/// Signed rate shift in basis points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateAdjustment(i32);

impl RateAdjustment {
    /// Creates an adjustment of `bps` basis points.
    #[must_use]
    pub fn new(bps: i32) -> Self {
        Self(bps)
    }

    /// The shift in basis points.
    #[must_use]
    pub fn bps(&self) -> i32 {
        self.0
    }

    /// The shift in percentage points.
    #[must_use]
    pub fn percent(&self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Adds `delta` basis points to the adjustment.
    #[must_use]
    pub fn shift(self, delta: i32) -> Self {
        Self(self.0.saturating_add(delta))
    }

    /// The zero adjustment.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// True if no shift is applied.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RateAdjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{} bps", self.0)
        } else {
            write!(f, "{} bps", self.0)
        }
    }
}

/// Which dataset the dashboard is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portfolio {
    /// The dataset as loaded.
    #[default]
    Original,
    /// The rate-adjusted derivative.
    Adjusted,
}

impl fmt::Display for Portfolio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Adjusted => write!(f, "adjusted"),
        }
    }
}

impl FromStr for Portfolio {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(Self::Original),
            "adjusted" => Ok(Self::Adjusted),
            other => Err(AnalyticsError::invalid_request(format!(
                "portfolio must be 'original' or 'adjusted', got '{other}'"
            ))),
        }
    }
}

/// Column names read and written by the recalculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateFields {
    /// Principal amount column.
    pub principal: String,
    /// Base rate column, in percent.
    pub rate: String,
    /// Term column, in months.
    pub term: String,
    /// Interest earned column.
    pub interest_earned: String,
    /// Total value column.
    pub total_value: String,
    /// APY column.
    pub apy: String,
}

impl Default for RateFields {
    fn default() -> Self {
        Self {
            principal: "principal_amount".into(),
            rate: "interest_rate".into(),
            term: "term_months".into(),
            interest_earned: "interest_earned".into(),
            total_value: "total_value".into(),
            apy: "apy".into(),
        }
    }
}

impl RateFields {
    /// True if the dataset has the principal, rate and term columns.
    #[must_use]
    pub fn applies_to(&self, dataset: &Dataset) -> bool {
        [&self.principal, &self.rate, &self.term]
            .iter()
            .all(|c| dataset.has_column(c))
    }

    /// Output columns, in the order they are appended to a schema.
    #[must_use]
    pub fn derived_columns(&self) -> [&str; 4] {
        [
            self.rate.as_str(),
            self.interest_earned.as_str(),
            self.total_value.as_str(),
            self.apy.as_str(),
        ]
    }
}

/// Recomputed values for one row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Adjusted rate, in percent.
    pub rate: f64,
    /// Simple interest over the term.
    pub interest_earned: f64,
    /// Principal plus interest.
    pub total_value: f64,
    /// Annual percentage yield as a fraction.
    pub apy: f64,
}

impl DerivedMetrics {
    /// Computes the derived values for one position.
    #[must_use]
    pub fn compute(
        principal: f64,
        base_rate: f64,
        term_months: f64,
        adjustment: RateAdjustment,
    ) -> Self {
        let rate = adjusted_rate(base_rate, adjustment);
        let term_years = term_months / 12.0;
        let interest_earned = principal * rate * term_years / 100.0;
        Self {
            rate,
            interest_earned,
            total_value: principal + interest_earned,
            apy: (1.0 + rate / 100.0).powi(APY_PERIODS) - 1.0,
        }
    }
}

/// Shifts a base rate, flooring the result at [`MIN_RATE`].
#[must_use]
pub fn adjusted_rate(base_rate: f64, adjustment: RateAdjustment) -> f64 {
    (base_rate + adjustment.percent()).max(MIN_RATE)
}

fn recalculate_row(row: &Row, adjustment: RateAdjustment, fields: &RateFields) -> Option<Row> {
    let principal = row.number(&fields.principal)?;
    let base_rate = row.number(&fields.rate)?;
    let term = row.number(&fields.term)?;

    let metrics = DerivedMetrics::compute(principal, base_rate, term, adjustment);
    let mut adjusted = row.clone();
    adjusted.insert(fields.rate.clone(), metrics.rate);
    adjusted.insert(fields.interest_earned.clone(), metrics.interest_earned);
    adjusted.insert(fields.total_value.clone(), metrics.total_value);
    adjusted.insert(fields.apy.clone(), metrics.apy);
    Some(adjusted)
}

/// Recomputes derived fields for every row.
///
/// Rows whose principal, rate or term is not numeric are copied unchanged.
#[must_use]
pub fn recalculate_rows(
    rows: &[Row],
    adjustment: RateAdjustment,
    fields: &RateFields,
    config: &PipelineConfig,
) -> Vec<Row> {
    let results = maybe_parallel_map(rows, config, |row| {
        recalculate_row(row, adjustment, fields).ok_or_else(|| row.clone())
    });

    let skipped = results.iter().filter(|r| r.is_err()).count();
    if skipped > 0 {
        debug!(skipped, "rows without numeric principal/rate/term copied unchanged");
    }

    results
        .into_iter()
        .map(|r| match r {
            Ok(row) | Err(row) => row,
        })
        .collect()
}

/// Builds the adjusted derivative of a dataset.
///
/// The input is untouched. Derived columns missing from the schema are
/// appended to the column list.
#[must_use]
pub fn recalculate(
    dataset: &Dataset,
    adjustment: RateAdjustment,
    fields: &RateFields,
    config: &PipelineConfig,
) -> Dataset {
    let rows = recalculate_rows(dataset.rows(), adjustment, fields, config);
    let mut adjusted = dataset.with_rows(rows);
    for column in fields.derived_columns() {
        adjusted.ensure_column(column);
    }
    debug!(
        rows = adjusted.row_count(),
        adjustment = %adjustment,
        "recalculated derived metrics"
    );
    adjusted
}
