//! # Glimpsy Analytics
//!
//! The dataset exploration pipeline behind the Glimpsy dashboard.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every operation takes explicit inputs and returns a
//!   new value; datasets are never mutated in place
//! - **Degrade, don't fail**: malformed cells, missing columns and empty
//!   inputs become "no constraint" or "no data", never errors
//! - **Config-driven thresholds**: every cutoff lives in [`PipelineConfig`]
//!
//! ## Pipeline
//!
//! ```text
//! rows -> classify -> build_templates -> (UI) -> FilterSet::apply -> summarize / compare
//!                                                     ^
//!             recalculate (rate adjustment) ----------+
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use glimpsy_analytics::prelude::*;
//! use glimpsy_core::{Dataset, Row};
//!
//! let rows = vec![
//!     Row::new().with("status", "Active").with("x", 5.0),
//!     Row::new().with("status", "Matured").with("x", 15.0),
//!     Row::new().with("status", "Active").with("x", 20.0),
//! ];
//! let dataset = Dataset::from_rows(rows);
//! let config = PipelineConfig::default();
//!
//! let filters = FilterSet::new(
//!     DateRange::default(),
//!     vec![
//!         FilterDescriptor::categorical("status", ["Active"]),
//!         FilterDescriptor::numerical("x", Some(10.0), None),
//!     ],
//! );
//! let filtered = filter_dataset(&dataset, &filters, &config);
//! assert_eq!(filtered.row_count(), 1);
//!
//! let summary = summarize(filtered.rows(), "x", &config).unwrap();
//! assert_eq!(summary.max, 20.0);
//! ```
//!
//! ## Module Overview
//!
//! - [`classify`] - column type inference
//! - [`filter`] - templates, descriptors, the engine and wire-form requests
//! - [`derived`] - basis-point rate adjustment of CD rows
//! - [`summary`] - column summaries, filter stats, dataset overview
//! - [`comparison`] - two-dataset comparison
//! - [`chart`] - chart series preparation
//! - [`table`] - search and pagination
//! - [`session`] - reducer-style dashboard state
//! - [`demo`] - seeded demo datasets
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel processing for large datasets

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod classify;
pub mod comparison;
pub mod demo;
pub mod derived;
pub mod error;
pub mod filter;
pub mod parallel;
pub mod session;
pub mod summary;
pub mod table;
pub mod types;

pub use error::{AnalyticsError, AnalyticsResult};

pub use types::{ColumnClassification, ColumnKind, ColumnTypes, DateMatch, PipelineConfig};

pub use chart::{prepare_series, Aggregation, ChartKind, ChartPoint, ChartRequest, ChartSeries};
pub use classify::{classify, classify_column, classify_columns};
pub use comparison::{compare, ColumnDelta, ComparisonReport};
pub use demo::{DemoDataset, Lcg};
pub use derived::{
    adjusted_rate, recalculate, recalculate_rows, DerivedMetrics, Portfolio, RateAdjustment,
    RateFields, MIN_RATE,
};
pub use filter::{
    apply_filters, build_templates, filter_dataset, Constraint, DateRange, FilterDescriptor,
    FilterRequest, FilterSet, FilterTemplates, NumericBounds, Selection,
};
pub use session::{Action, DashboardState, DashboardView};
pub use summary::{overview, summarize, ColumnSummary, DatasetOverview, FilterStats};
pub use table::{search, Paginator, TablePage};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::chart::{prepare_series, ChartKind, ChartRequest, ChartSeries};
    pub use crate::classify::classify;
    pub use crate::comparison::{compare, ComparisonReport};
    pub use crate::derived::{recalculate, Portfolio, RateAdjustment, RateFields};
    pub use crate::error::{AnalyticsError, AnalyticsResult};
    pub use crate::filter::{
        apply_filters, build_templates, filter_dataset, DateRange, FilterDescriptor,
        FilterRequest, FilterSet, FilterTemplates,
    };
    pub use crate::session::{Action, DashboardState};
    pub use crate::summary::{overview, summarize, ColumnSummary, FilterStats};
    pub use crate::table::{search, Paginator};
    pub use crate::types::{ColumnKind, ColumnTypes, DateMatch, PipelineConfig};
}
