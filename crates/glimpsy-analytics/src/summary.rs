//! Column summaries, filter statistics and dataset overviews.

use crate::parallel::maybe_parallel_fold;
use crate::types::PipelineConfig;
use glimpsy_core::{Dataset, Row};
use serde::{Deserialize, Serialize};

/// Count, extremes and mean of a column's numeric readings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    /// Number of numeric readings.
    pub count: usize,
    /// Smallest reading.
    pub min: f64,
    /// Largest reading.
    pub max: f64,
    /// Mean reading.
    pub avg: f64,
    /// Sum of readings.
    pub sum: f64,
}

#[derive(Clone, Copy)]
struct Accumulator {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    const EMPTY: Self = Self {
        count: 0,
        sum: 0.0,
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    fn push(self, v: f64) -> Self {
        Self {
            count: self.count + 1,
            sum: self.sum + v,
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            count: self.count + other.count,
            sum: self.sum + other.sum,
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    fn finish(self) -> Option<ColumnSummary> {
        (self.count > 0).then(|| ColumnSummary {
            count: self.count,
            min: self.min,
            max: self.max,
            avg: self.sum / self.count as f64,
            sum: self.sum,
        })
    }
}

/// Summarizes the numeric readings of a column.
///
/// Returns `None` when no row holds a numeric reading, which is distinct
/// from a column whose readings are all zero.
#[must_use]
pub fn summarize(rows: &[Row], column: &str, config: &PipelineConfig) -> Option<ColumnSummary> {
    maybe_parallel_fold(
        rows,
        config,
        Accumulator::EMPTY,
        |acc, row| match row.number(column) {
            Some(v) => acc.push(v),
            None => acc,
        },
        Accumulator::merge,
    )
    .finish()
}

/// Mean of a column's numeric readings.
#[must_use]
pub fn column_average(rows: &[Row], column: &str, config: &PipelineConfig) -> Option<f64> {
    summarize(rows, column, config).map(|s| s.avg)
}

/// How much of a dataset a filter kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    /// Rows before filtering.
    pub total: usize,
    /// Rows after filtering.
    pub filtered: usize,
    /// Share kept, in percent; 0 when there were no rows.
    pub filtered_pct: f64,
    /// Rows removed.
    pub filtered_out: usize,
}

impl FilterStats {
    /// Computes stats from before and after counts.
    #[must_use]
    pub fn new(total: usize, filtered: usize) -> Self {
        let filtered_pct = if total == 0 {
            0.0
        } else {
            filtered as f64 / total as f64 * 100.0
        };
        Self {
            total,
            filtered,
            filtered_pct,
            filtered_out: total.saturating_sub(filtered),
        }
    }
}

/// Average of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnAverage {
    /// Column name.
    pub column: String,
    /// Mean reading.
    pub avg: f64,
}

/// Headline facts about a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    /// Number of rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Columns holding at least one numeric reading.
    pub numeric_columns: Vec<String>,
    /// Averages of the leading numeric columns.
    pub highlights: Vec<ColumnAverage>,
}

/// Builds the overview of a dataset.
#[must_use]
pub fn overview(dataset: &Dataset, config: &PipelineConfig) -> DatasetOverview {
    let numeric_columns = dataset.numeric_columns();
    let highlights = numeric_columns
        .iter()
        .take(config.comparison_columns)
        .filter_map(|column| {
            column_average(dataset.rows(), column, config).map(|avg| ColumnAverage {
                column: column.clone(),
                avg,
            })
        })
        .collect();

    DatasetOverview {
        row_count: dataset.row_count(),
        column_count: dataset.columns().len(),
        numeric_columns,
        highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glimpsy_core::Value;

    #[test]
    fn test_summarize() {
        let rows = vec![
            Row::new().with("x", 4.0),
            Row::new().with("x", "n/a"),
            Row::new().with("x", "10"),
            Row::new().with("y", 1.0),
            Row::new().with("x", -2.0),
        ];
        let s = summarize(&rows, "x", &PipelineConfig::default()).unwrap();
        assert_eq!(s.count, 3);
        assert_relative_eq!(s.min, -2.0);
        assert_relative_eq!(s.max, 10.0);
        assert_relative_eq!(s.avg, 4.0);
        assert_relative_eq!(s.sum, 12.0);
    }

    #[test]
    fn test_summarize_reads_numeric_prefix() {
        let rows: Vec<Row> = ["0.5%", "1.5%", "4%", "pending"]
            .into_iter()
            .map(|v| Row::new().with("rate_pct", v))
            .collect();
        let s = summarize(&rows, "rate_pct", &PipelineConfig::default()).unwrap();
        assert_eq!(s.count, 3);
        assert_relative_eq!(s.min, 0.5);
        assert_relative_eq!(s.max, 4.0);
        assert_relative_eq!(s.sum, 6.0);
        assert_relative_eq!(s.avg, 2.0);
    }

    #[test]
    fn test_no_data_is_none() {
        let config = PipelineConfig::default();
        let rows = vec![Row::new().with("x", Value::Null), Row::new().with("x", "abc")];
        assert!(summarize(&rows, "x", &config).is_none());
        assert!(summarize(&[], "x", &config).is_none());

        let zeros = vec![Row::new().with("x", 0.0)];
        let s = summarize(&zeros, "x", &config).unwrap();
        assert_relative_eq!(s.avg, 0.0);
    }

    #[test]
    fn test_filter_stats() {
        let stats = FilterStats::new(200, 50);
        assert_relative_eq!(stats.filtered_pct, 25.0);
        assert_eq!(stats.filtered_out, 150);

        let empty = FilterStats::new(0, 0);
        assert_relative_eq!(empty.filtered_pct, 0.0);
        assert_eq!(empty.filtered_out, 0);
    }

    #[test]
    fn test_overview() {
        let rows: Vec<Row> = (1..=4)
            .map(|i| {
                Row::new()
                    .with("a", f64::from(i))
                    .with("b", f64::from(i * 10))
                    .with("label", format!("row {i}"))
                    .with("c", 1.0)
                    .with("d", 2.0)
            })
            .collect();
        let ds = Dataset::new(
            vec!["a".into(), "label".into(), "b".into(), "c".into(), "d".into()],
            rows,
        )
        .unwrap();

        let ov = overview(&ds, &PipelineConfig::default());
        assert_eq!(ov.row_count, 4);
        assert_eq!(ov.column_count, 5);
        assert_eq!(ov.numeric_columns, vec!["a", "b", "c", "d"]);
        assert_eq!(ov.highlights.len(), 3);
        assert_relative_eq!(ov.highlights[0].avg, 2.5);
        assert_relative_eq!(ov.highlights[1].avg, 25.0);
        assert_eq!(ov.highlights[2].column, "c");
    }
}
