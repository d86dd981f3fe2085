//! Reproducible demo datasets.
//!
//! Every fixture draws from its own [`Lcg`] seeded with [`DEMO_SEED`], so
//! the same arguments always produce the same rows.

mod finance;
mod health;
pub mod lcg;
mod sales;

pub use finance::{finance_dataset, FINANCE_ROWS};
pub use health::{health_dataset, HEALTH_ROWS};
pub use lcg::{next_state, Lcg, DEMO_SEED};
pub use sales::{sales_dataset, SALES_ROWS};

use crate::error::AnalyticsError;
use chrono::NaiveDate;
use glimpsy_core::Dataset;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The built-in fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoDataset {
    /// Certificate-of-deposit accounts.
    Finance,
    /// Retail sales.
    Sales,
    /// Public health cases.
    Health,
}

impl DemoDataset {
    /// Default row count.
    #[must_use]
    pub fn default_rows(&self) -> usize {
        match self {
            Self::Finance => FINANCE_ROWS,
            Self::Sales => SALES_ROWS,
            Self::Health => HEALTH_ROWS,
        }
    }

    /// Generates the fixture. `today` only affects the finance book.
    #[must_use]
    pub fn generate(&self, rows: Option<usize>, today: NaiveDate) -> Dataset {
        let rows = rows.unwrap_or_else(|| self.default_rows());
        match self {
            Self::Finance => finance_dataset(rows, today),
            Self::Sales => sales_dataset(rows),
            Self::Health => health_dataset(rows),
        }
    }
}

impl fmt::Display for DemoDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finance => write!(f, "finance"),
            Self::Sales => write!(f, "sales"),
            Self::Health => write!(f, "health"),
        }
    }
}

impl FromStr for DemoDataset {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "finance" => Ok(Self::Finance),
            "sales" => Ok(Self::Sales),
            "health" => Ok(Self::Health),
            other => Err(AnalyticsError::invalid_request(format!(
                "unknown demo dataset '{other}'"
            ))),
        }
    }
}
