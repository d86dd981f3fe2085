//! Filter evaluation.
//!
//! Stages run in a fixed order: date window, categorical descriptors,
//! numerical descriptors. Each stage narrows the survivors of the previous
//! one and preserves their relative order. Inputs are never mutated.

use super::descriptor::{DateRange, FilterDescriptor};
use crate::parallel::maybe_parallel_filter;
use crate::types::PipelineConfig;
use glimpsy_core::{Dataset, Row};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A date window plus column descriptors, applied together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Shared date window.
    #[serde(default)]
    pub date_range: DateRange,
    /// Column descriptors.
    #[serde(default)]
    pub descriptors: Vec<FilterDescriptor>,
}

impl FilterSet {
    /// Creates a filter set.
    #[must_use]
    pub fn new(date_range: DateRange, descriptors: Vec<FilterDescriptor>) -> Self {
        Self {
            date_range,
            descriptors,
        }
    }

    /// True if applying the set can never exclude a row.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.date_range.is_unbounded() && self.descriptors.iter().all(FilterDescriptor::is_identity)
    }

    /// Applies the set to a row slice.
    #[must_use]
    pub fn apply(&self, rows: &[Row], config: &PipelineConfig) -> Vec<Row> {
        apply_filters(rows, &self.date_range, &self.descriptors, config)
    }
}

/// Applies a date window and descriptors to rows, returning the survivors.
#[must_use]
pub fn apply_filters(
    rows: &[Row],
    date_range: &DateRange,
    descriptors: &[FilterDescriptor],
    config: &PipelineConfig,
) -> Vec<Row> {
    let mut survivors: Vec<&Row> = rows.iter().collect();

    if !date_range.is_unbounded() {
        survivors = maybe_parallel_filter(survivors, config, |row| date_range.matches(row));
        debug!(remaining = survivors.len(), "date stage");
    }

    let active = descriptors.iter().filter(|d| !d.is_identity());
    let (categorical, numerical): (Vec<_>, Vec<_>) = active.partition(|d| d.is_categorical());

    for descriptor in categorical.into_iter().chain(numerical) {
        if survivors.is_empty() {
            break;
        }
        survivors = maybe_parallel_filter(survivors, config, |row| descriptor.matches(row));
        debug!(
            column = %descriptor.column,
            remaining = survivors.len(),
            "descriptor stage"
        );
    }

    survivors.into_iter().cloned().collect()
}

/// Applies a filter set to a dataset, keeping its column schema.
///
/// Descriptors naming columns outside the schema are logged and evaluate
/// vacuously.
#[must_use]
pub fn filter_dataset(dataset: &Dataset, filters: &FilterSet, config: &PipelineConfig) -> Dataset {
    for descriptor in filters.descriptors.iter().filter(|d| d.enabled) {
        if !dataset.has_column(&descriptor.column) {
            warn!(column = %descriptor.column, "filter references unknown column, ignoring");
        }
    }
    for field in &filters.date_range.fields {
        if !dataset.has_column(field) {
            warn!(column = %field, "date range references unknown column, ignoring");
        }
    }

    let rows = filters.apply(dataset.rows(), config);
    debug!(
        total = dataset.row_count(),
        filtered = rows.len(),
        "filtered dataset"
    );
    dataset.with_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpsy_core::Value;

    fn statuses() -> Vec<Row> {
        ["Active", "Matured", "Active"]
            .iter()
            .enumerate()
            .map(|(i, s)| Row::new().with("id", i as f64).with("status", *s))
            .collect()
    }

    #[test]
    fn test_categorical_keeps_order() {
        let desc = FilterDescriptor::categorical("status", ["Active"]);
        let out = apply_filters(&statuses(), &DateRange::default(), &[desc], &PipelineConfig::default());
        let ids: Vec<f64> = out.iter().filter_map(|r| r.number("id")).collect();
        assert_eq!(ids, vec![0.0, 2.0]);
    }

    #[test]
    fn test_numerical_inclusive() {
        let rows: Vec<Row> = [5.0, 15.0, 25.0, 20.0]
            .iter()
            .map(|x| Row::new().with("x", *x))
            .collect();
        let desc = FilterDescriptor::numerical("x", Some(10.0), Some(20.0));
        let out = apply_filters(&rows, &DateRange::default(), &[desc], &PipelineConfig::default());
        let xs: Vec<f64> = out.iter().filter_map(|r| r.number("x")).collect();
        assert_eq!(xs, vec![15.0, 20.0]);
    }

    #[test]
    fn test_identity_set() {
        let rows = statuses();
        let set = FilterSet::new(
            DateRange::over(["date"]),
            vec![
                FilterDescriptor::categorical("status", ["Matured"]).with_enabled(false),
                FilterDescriptor::numerical("id", None, None),
            ],
        );
        assert!(set.is_identity());
        assert_eq!(set.apply(&rows, &PipelineConfig::default()), rows);
    }

    #[test]
    fn test_stages_combine() {
        let rows = vec![
            Row::new().with("date", "2024-01-10").with("status", "Active").with("amt", 100.0),
            Row::new().with("date", "2024-02-10").with("status", "Active").with("amt", 900.0),
            Row::new().with("date", "2024-02-20").with("status", "Matured").with("amt", 150.0),
            Row::new().with("date", "2024-02-25").with("status", "Active").with("amt", 200.0),
        ];
        let set = FilterSet::new(
            DateRange::over(["date"]).with_start(Some("2024-02-01")),
            vec![
                FilterDescriptor::numerical("amt", None, Some(500.0)),
                FilterDescriptor::categorical("status", ["Active"]),
            ],
        );
        let out = set.apply(&rows, &PipelineConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display("date"), "2024-02-25");
    }

    #[test]
    fn test_unknown_column_is_vacuous() {
        let ds = Dataset::from_rows(statuses());
        let set = FilterSet::new(
            DateRange::default(),
            vec![FilterDescriptor::categorical("region", ["North"])],
        );
        let out = filter_dataset(&ds, &set, &PipelineConfig::default());
        assert_eq!(out.row_count(), 3);
        assert_eq!(out.columns(), ds.columns());
    }

    #[test]
    fn test_null_values_fail_bounds() {
        let rows = vec![
            Row::new().with("x", Value::Null),
            Row::new().with("x", 3.0),
        ];
        let desc = FilterDescriptor::numerical("x", Some(0.0), None);
        let out = apply_filters(&rows, &DateRange::default(), &[desc], &PipelineConfig::default());
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_empty_input() {
        let desc = FilterDescriptor::categorical("status", ["Active"]);
        assert!(apply_filters(&[], &DateRange::default(), &[desc], &PipelineConfig::default()).is_empty());
    }
}
