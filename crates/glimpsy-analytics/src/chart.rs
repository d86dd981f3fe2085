//! Chart series preparation.
//!
//! Turns rows into the label/value pairs a charting library draws. No
//! rendering happens here. A y cell that is not numeric counts as 0.

use crate::error::AnalyticsError;
use glimpsy_core::{parse_number, Row};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Kind of chart a series is prepared for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Points sorted by x.
    #[default]
    Line,
    /// Sum (or mean) of y per x label.
    Bar,
    /// Sum of y per x label.
    Pie,
    /// Points sorted by x.
    Scatter,
    /// Distribution of one numeric column.
    Histogram,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Histogram => "histogram",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "line" => Ok(Self::Line),
            "bar" => Ok(Self::Bar),
            "pie" | "doughnut" => Ok(Self::Pie),
            "scatter" => Ok(Self::Scatter),
            "histogram" => Ok(Self::Histogram),
            _ => Err(AnalyticsError::UnknownChartKind { kind: s.to_string() }),
        }
    }
}

/// How bar charts combine the y values of one label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Sum of values.
    #[default]
    Sum,
    /// Mean of values.
    Mean,
}

/// One drawable point or bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// X label.
    pub label: String,
    /// Y value.
    pub value: f64,
}

/// A prepared series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Chart kind.
    pub kind: ChartKind,
    /// X column.
    pub x_column: String,
    /// Y column; absent for histograms.
    pub y_column: Option<String>,
    /// Points in drawing order.
    pub points: Vec<ChartPoint>,
}

/// What to plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Chart kind.
    pub kind: ChartKind,
    /// X column (the value column for histograms).
    pub x: String,
    /// Y column.
    pub y: String,
    /// Bar aggregation.
    pub aggregation: Aggregation,
    /// Bucket count for histograms.
    pub bins: usize,
}

impl ChartRequest {
    /// Creates a request summing bar values.
    #[must_use]
    pub fn new(kind: ChartKind, x: impl Into<String>, y: impl Into<String>) -> Self {
        Self {
            kind,
            x: x.into(),
            y: y.into(),
            aggregation: Aggregation::Sum,
            bins: 10,
        }
    }

    /// Averages instead of sums bar values when `y` is one of `rate_columns`.
    ///
    /// Summing rates across accounts is meaningless, so rate columns are
    /// averaged.
    #[must_use]
    pub fn averaging(mut self, rate_columns: &[&str]) -> Self {
        if rate_columns.contains(&self.y.as_str()) {
            self.aggregation = Aggregation::Mean;
        }
        self
    }

    /// Sets the histogram bucket count.
    #[must_use]
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }
}

/// Prepares a series for the requested chart.
#[must_use]
pub fn prepare_series(rows: &[Row], request: &ChartRequest) -> ChartSeries {
    let points = match request.kind {
        ChartKind::Line | ChartKind::Scatter => sorted_points(rows, &request.x, &request.y),
        ChartKind::Bar => grouped_points(rows, &request.x, &request.y, request.aggregation),
        ChartKind::Pie => grouped_points(rows, &request.x, &request.y, Aggregation::Sum),
        ChartKind::Histogram => histogram(&numeric_values(rows, &request.x), request.bins),
    };

    ChartSeries {
        kind: request.kind,
        x_column: request.x.clone(),
        y_column: (request.kind != ChartKind::Histogram).then(|| request.y.clone()),
        points,
    }
}

/// Numeric readings of a column, in row order.
#[must_use]
pub fn numeric_values(rows: &[Row], column: &str) -> Vec<f64> {
    rows.iter().filter_map(|r| r.number(column)).collect()
}

#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(label: &str) -> Self {
        parse_number(label).map_or_else(|| Self::Text(label.to_string()), Self::Number)
    }

    // Numbers sort before text.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}

fn y_value(row: &Row, y: &str) -> f64 {
    row.number(y).unwrap_or(0.0)
}

fn sorted_points(rows: &[Row], x: &str, y: &str) -> Vec<ChartPoint> {
    let mut keyed: Vec<(SortKey, ChartPoint)> = rows
        .iter()
        .map(|row| {
            let label = row.display(x);
            (
                SortKey::of(&label),
                ChartPoint {
                    label,
                    value: y_value(row, y),
                },
            )
        })
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    keyed.into_iter().map(|(_, p)| p).collect()
}

fn grouped_points(rows: &[Row], x: &str, y: &str, aggregation: Aggregation) -> Vec<ChartPoint> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();

    for row in rows {
        let label = row.display(x);
        let entry = groups.entry(label.clone()).or_insert_with(|| {
            order.push(label);
            (0.0, 0)
        });
        entry.0 += y_value(row, y);
        entry.1 += 1;
    }

    order
        .into_iter()
        .filter_map(|label| {
            let (sum, count) = groups.get(&label).copied()?;
            let value = match aggregation {
                Aggregation::Sum => sum,
                Aggregation::Mean => sum / count as f64,
            };
            Some(ChartPoint { label, value })
        })
        .collect()
}

/// Buckets values into equal-width bins labelled `lo-hi`.
///
/// All values fall in a single bin when they are equal.
#[must_use]
pub fn histogram(values: &[f64], bins: usize) -> Vec<ChartPoint> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![ChartPoint {
            label: format!("{min}-{max}"),
            value: values.len() as f64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = min + width * i as f64;
            let hi = lo + width;
            ChartPoint {
                label: format!("{lo:.2}-{hi:.2}"),
                value: count as f64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("term", 12.0).with("bank", "Chase").with("rate", 2.0),
            Row::new().with("term", 3.0).with("bank", "Ally").with("rate", 1.0),
            Row::new().with("term", 12.0).with("bank", "Chase").with("rate", "n/a"),
            Row::new().with("term", 6.0).with("bank", "Chase").with("rate", 4.0),
        ]
    }

    #[test]
    fn test_line_sorted_by_x() {
        let series = prepare_series(&rows(), &ChartRequest::new(ChartKind::Line, "term", "rate"));
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["3", "6", "12", "12"]);
        // stable: the two 12s keep row order, the second has a non-numeric y
        assert_relative_eq!(series.points[2].value, 2.0);
        assert_relative_eq!(series.points[3].value, 0.0);
    }

    #[test]
    fn test_bar_sum_and_mean() {
        let sum = prepare_series(&rows(), &ChartRequest::new(ChartKind::Bar, "bank", "rate"));
        assert_eq!(sum.points[0].label, "Chase");
        assert_relative_eq!(sum.points[0].value, 6.0);
        assert_relative_eq!(sum.points[1].value, 1.0);

        let mean = prepare_series(
            &rows(),
            &ChartRequest::new(ChartKind::Bar, "bank", "rate").averaging(&["rate"]),
        );
        assert_relative_eq!(mean.points[0].value, 2.0);
    }

    #[test]
    fn test_pie_ignores_aggregation() {
        let request = ChartRequest::new(ChartKind::Pie, "bank", "rate").averaging(&["rate"]);
        let series = prepare_series(&rows(), &request);
        assert_relative_eq!(series.points[0].value, 6.0);
    }

    #[test]
    fn test_histogram() {
        let values = [0.0, 1.0, 2.0, 3.0, 10.0];
        let bins = histogram(&values, 2);
        assert_eq!(bins.len(), 2);
        assert_relative_eq!(bins[0].value, 4.0);
        assert_relative_eq!(bins[1].value, 1.0);

        let same = histogram(&[5.0, 5.0], 4);
        assert_eq!(same.len(), 1);
        assert_relative_eq!(same[0].value, 2.0);
        assert!(histogram(&[], 4).is_empty());

        let series = prepare_series(
            &rows(),
            &ChartRequest::new(ChartKind::Histogram, "term", "").with_bins(3),
        );
        assert!(series.y_column.is_none());
        let total: f64 = series.points.iter().map(|p| p.value).sum();
        assert_relative_eq!(total, 4.0);
    }

    #[test]
    fn test_mixed_labels_sort() {
        let rows = vec![
            Row::new().with("x", "b"),
            Row::new().with("x", 2.0),
            Row::new().with("x", "a"),
            Row::new().with("x", 1.0),
        ];
        let series = prepare_series(&rows, &ChartRequest::new(ChartKind::Scatter, "x", "y"));
        let labels: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["1", "2", "a", "b"]);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("BAR".parse::<ChartKind>().unwrap(), ChartKind::Bar);
        assert_eq!("doughnut".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert!("radar".parse::<ChartKind>().is_err());
    }
}
