//! Side-by-side comparison of two datasets.

use crate::summary::column_average;
use crate::types::PipelineConfig;
use glimpsy_core::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Average of one numeric column in both datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDelta {
    /// Column name.
    pub column: String,
    /// Mean in the first dataset.
    pub avg_a: f64,
    /// Mean in the second dataset.
    pub avg_b: f64,
    /// `avg_b - avg_a`.
    pub difference: f64,
    /// Difference relative to `avg_a`, in percent; `None` when `avg_a` is 0.
    pub difference_pct: Option<f64>,
}

impl ColumnDelta {
    /// Builds a delta from the two averages.
    #[must_use]
    pub fn new(column: impl Into<String>, avg_a: f64, avg_b: f64) -> Self {
        let difference = avg_b - avg_a;
        Self {
            column: column.into(),
            avg_a,
            avg_b,
            difference,
            difference_pct: (avg_a != 0.0).then(|| difference / avg_a * 100.0),
        }
    }
}

/// Result of comparing two datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Rows in the first dataset.
    pub row_count_a: usize,
    /// Rows in the second dataset.
    pub row_count_b: usize,
    /// `row_count_b - row_count_a`.
    pub row_count_delta: i64,
    /// Delta relative to the first dataset, in percent; `None` when it is empty.
    pub row_count_delta_pct: Option<f64>,
    /// Columns in both datasets, in the first dataset's order.
    pub common_columns: Vec<String>,
    /// Columns only in the first dataset.
    pub only_in_a: Vec<String>,
    /// Columns only in the second dataset.
    pub only_in_b: Vec<String>,
    /// Averages of the leading columns that are numeric in both datasets.
    pub column_deltas: Vec<ColumnDelta>,
}

impl ComparisonReport {
    /// The column a comparison histogram is drawn for.
    #[must_use]
    pub fn histogram_column(&self) -> Option<&str> {
        self.column_deltas.first().map(|d| d.column.as_str())
    }
}

/// Compares two datasets. Neither input is modified.
#[must_use]
pub fn compare(a: &Dataset, b: &Dataset, config: &PipelineConfig) -> ComparisonReport {
    let cols_a: HashSet<&str> = a.columns().iter().map(String::as_str).collect();
    let cols_b: HashSet<&str> = b.columns().iter().map(String::as_str).collect();

    let common_columns: Vec<String> = a
        .columns()
        .iter()
        .filter(|c| cols_b.contains(c.as_str()))
        .cloned()
        .collect();
    let only_in_a = a
        .columns()
        .iter()
        .filter(|c| !cols_b.contains(c.as_str()))
        .cloned()
        .collect();
    let only_in_b = b
        .columns()
        .iter()
        .filter(|c| !cols_a.contains(c.as_str()))
        .cloned()
        .collect();

    let column_deltas = common_columns
        .iter()
        .filter(|c| a.is_numeric_column(c) && b.is_numeric_column(c))
        .take(config.comparison_columns)
        .filter_map(|c| {
            let avg_a = column_average(a.rows(), c, config)?;
            let avg_b = column_average(b.rows(), c, config)?;
            Some(ColumnDelta::new(c.clone(), avg_a, avg_b))
        })
        .collect();

    let (count_a, count_b) = (a.row_count(), b.row_count());
    let row_count_delta = count_b as i64 - count_a as i64;

    ComparisonReport {
        row_count_a: count_a,
        row_count_b: count_b,
        row_count_delta,
        row_count_delta_pct: (count_a > 0).then(|| row_count_delta as f64 / count_a as f64 * 100.0),
        common_columns,
        only_in_a,
        only_in_b,
        column_deltas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glimpsy_core::Row;

    fn dataset(n: usize, columns: &[&str], scale: f64) -> Dataset {
        let rows = (0..n)
            .map(|i| {
                columns
                    .iter()
                    .map(|c| (*c, if *c == "name" { 0.0 } else { scale * (i % 3) as f64 }))
                    .collect::<Row>()
                    .with("name", format!("row {i}"))
            })
            .collect();
        Dataset::new(columns.iter().map(|c| (*c).to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn test_row_delta() {
        let a = dataset(100, &["x"], 1.0);
        let b = dataset(150, &["x"], 1.0);
        let report = compare(&a, &b, &PipelineConfig::default());
        assert_eq!(report.row_count_delta, 50);
        assert_relative_eq!(report.row_count_delta_pct.unwrap(), 50.0);

        let shrink = compare(&b, &a, &PipelineConfig::default());
        assert_eq!(shrink.row_count_delta, -50);
    }

    #[test]
    fn test_empty_first_dataset() {
        let a = dataset(0, &["x"], 1.0);
        let b = dataset(10, &["x"], 1.0);
        let report = compare(&a, &b, &PipelineConfig::default());
        assert_eq!(report.row_count_delta, 10);
        assert!(report.row_count_delta_pct.is_none());
        assert!(report.column_deltas.is_empty());
    }

    #[test]
    fn test_column_sets() {
        let a = dataset(3, &["name", "x", "y", "only_a"], 1.0);
        let b = dataset(3, &["z", "y", "name", "x"], 2.0);
        let report = compare(&a, &b, &PipelineConfig::default());
        assert_eq!(report.common_columns, vec!["name", "x", "y"]);
        assert_eq!(report.only_in_a, vec!["only_a"]);
        assert_eq!(report.only_in_b, vec!["z"]);

        // "name" is text in both, so x and y are compared
        let cols: Vec<&str> = report.column_deltas.iter().map(|d| d.column.as_str()).collect();
        assert_eq!(cols, vec!["x", "y"]);
        let x = &report.column_deltas[0];
        assert_relative_eq!(x.avg_a, 1.0);
        assert_relative_eq!(x.avg_b, 2.0);
        assert_relative_eq!(x.difference_pct.unwrap(), 100.0);
        assert_eq!(report.histogram_column(), Some("x"));
    }

    #[test]
    fn test_column_limit() {
        let cols = ["a", "b", "c", "d", "e"];
        let report = compare(
            &dataset(4, &cols, 1.0),
            &dataset(4, &cols, 1.0),
            &PipelineConfig::default(),
        );
        assert_eq!(report.column_deltas.len(), 3);
    }

    #[test]
    fn test_zero_average_has_no_pct() {
        let delta = ColumnDelta::new("x", 0.0, 5.0);
        assert_relative_eq!(delta.difference, 5.0);
        assert!(delta.difference_pct.is_none());
    }
}
