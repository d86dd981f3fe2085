//! Filter templates derived from a classified dataset.
//!
//! Templates describe the controls a UI offers: option lists for
//! categorical columns, pre-filled ranges for numerical ones and a single
//! shared date window. Unlike classification, templates scan every row.

use super::descriptor::{DateRange, FilterDescriptor};
use crate::types::{ColumnTypes, PipelineConfig};
use chrono::NaiveDate;
use glimpsy_core::{parse_date, Dataset, Row};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Shared date window control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeTemplate {
    /// Column the bounds were read from (the first date column).
    pub column: String,
    /// Every date column the window applies to.
    pub fields: Vec<String>,
    /// Earliest parseable date.
    pub min: NaiveDate,
    /// Latest parseable date.
    pub max: NaiveDate,
}

impl DateRangeTemplate {
    /// Builds a range over this template's fields.
    #[must_use]
    pub fn to_range(&self, start: Option<&str>, end: Option<&str>) -> DateRange {
        DateRange::over(self.fields.iter().cloned())
            .with_start(start)
            .with_end(end)
    }
}

/// Option list for a categorical column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalTemplate {
    /// Column name.
    pub column: String,
    /// Sorted distinct non-empty display values.
    pub options: Vec<String>,
}

impl CategoricalTemplate {
    /// A descriptor selecting the given values of this column.
    pub fn select<I, S>(&self, values: I) -> FilterDescriptor
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterDescriptor::categorical(self.column.clone(), values)
    }
}

/// Range control for a numerical column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericalTemplate {
    /// Column name.
    pub column: String,
    /// Smallest reading.
    pub min: f64,
    /// Largest reading.
    pub max: f64,
    /// Mean reading.
    pub avg: f64,
}

impl NumericalTemplate {
    /// A descriptor pre-filled with the column's full range.
    #[must_use]
    pub fn full_range(&self) -> FilterDescriptor {
        FilterDescriptor::numerical(self.column.clone(), Some(self.min), Some(self.max))
    }
}

/// Every filter control offered for a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterTemplates {
    /// Shared date window, absent when no date column has a parseable date.
    pub date_range: Option<DateRangeTemplate>,
    /// Categorical controls in column order.
    pub categorical: Vec<CategoricalTemplate>,
    /// Numerical controls in column order.
    pub numerical: Vec<NumericalTemplate>,
}

impl FilterTemplates {
    /// Date columns covered by the date window, empty if there is none.
    #[must_use]
    pub fn date_fields(&self) -> Vec<String> {
        self.date_range
            .as_ref()
            .map(|t| t.fields.clone())
            .unwrap_or_default()
    }

    /// Number of controls, counting the date window as one.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.date_range.is_some()) + self.categorical.len() + self.numerical.len()
    }

    /// True if no control is offered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the date window from the first date column.
#[must_use]
pub fn date_range_template(rows: &[Row], types: &ColumnTypes) -> Option<DateRangeTemplate> {
    let dates = types.dates();
    let first = dates.first()?;

    let parsed = rows
        .iter()
        .filter_map(|row| row.get(first))
        .filter_map(|value| value.as_text().and_then(parse_date));
    let (min, max) = parsed.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
        None => Some((d, d)),
        Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    })?;

    Some(DateRangeTemplate {
        column: (*first).to_string(),
        fields: dates.iter().map(|c| (*c).to_string()).collect(),
        min,
        max,
    })
}

/// Builds the option list for one categorical column.
///
/// Returns `None` when the column has no non-empty values or more distinct
/// values than the config allows.
#[must_use]
pub fn categorical_template(
    rows: &[Row],
    column: &str,
    config: &PipelineConfig,
) -> Option<CategoricalTemplate> {
    let options: BTreeSet<String> = rows
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_empty())
        .map(|value| value.display_string())
        .collect();

    if options.is_empty() {
        debug!(column, "no values, categorical filter omitted");
        return None;
    }
    if options.len() > config.max_filter_options {
        debug!(
            column,
            options = options.len(),
            "too many options, categorical filter omitted"
        );
        return None;
    }

    Some(CategoricalTemplate {
        column: column.to_string(),
        options: options.into_iter().collect(),
    })
}

/// Builds the range control for one numerical column.
#[must_use]
pub fn numerical_template(rows: &[Row], column: &str) -> Option<NumericalTemplate> {
    let (count, sum, min, max) = rows
        .iter()
        .filter_map(|row| row.number(column))
        .fold((0usize, 0.0, f64::INFINITY, f64::NEG_INFINITY), |(n, s, lo, hi), v| {
            (n + 1, s + v, lo.min(v), hi.max(v))
        });

    if count == 0 {
        debug!(column, "no numeric values, numerical filter omitted");
        return None;
    }

    Some(NumericalTemplate {
        column: column.to_string(),
        min,
        max,
        avg: sum / count as f64,
    })
}

/// Builds every filter control for a dataset.
#[must_use]
pub fn build_templates(
    dataset: &Dataset,
    types: &ColumnTypes,
    config: &PipelineConfig,
) -> FilterTemplates {
    let rows = dataset.rows();
    let templates = FilterTemplates {
        date_range: date_range_template(rows, types),
        categorical: types
            .categorical()
            .into_iter()
            .filter_map(|column| categorical_template(rows, column, config))
            .collect(),
        numerical: types
            .numerical()
            .into_iter()
            .filter_map(|column| numerical_template(rows, column))
            .collect(),
    };

    debug!(
        date = templates.date_range.is_some(),
        categorical = templates.categorical.len(),
        numerical = templates.numerical.len(),
        "built filter templates"
    );
    templates
}
