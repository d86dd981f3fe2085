//! Column type inference.
//!
//! A column is a date if its name contains a date keyword. Otherwise the
//! first `sample_size` rows are inspected: mostly-numeric samples make it
//! numerical, a small set of repeated values makes it categorical, and
//! anything else is text. Only the sample is consulted, so a dataset whose
//! early rows are unrepresentative can be misclassified. That bias is
//! deterministic for a fixed row order.

use crate::types::{ColumnClassification, ColumnKind, ColumnTypes, PipelineConfig};
use glimpsy_core::{Dataset, Row, Value};
use std::collections::HashSet;
use tracing::debug;

/// Classifies one column of a row set.
#[must_use]
pub fn classify_column(rows: &[Row], column: &str, config: &PipelineConfig) -> ColumnKind {
    if config.is_date_name(column) {
        return ColumnKind::Date;
    }

    let sample: Vec<&Value> = rows
        .iter()
        .take(config.sample_size)
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_empty())
        .collect();

    if sample.is_empty() {
        return ColumnKind::Text;
    }

    let total = sample.len() as f64;
    let numeric = sample.iter().filter(|v| v.as_number().is_some()).count();
    if numeric as f64 / total > config.numeric_ratio {
        return ColumnKind::Numerical;
    }

    let unique: HashSet<String> = sample
        .iter()
        .map(|v| v.display_string().to_lowercase())
        .collect();
    if (unique.len() as f64) / total < config.unique_ratio
        && unique.len() <= config.max_categorical_uniques
    {
        ColumnKind::Categorical
    } else {
        ColumnKind::Text
    }
}

/// Classifies every named column of a row set.
#[must_use]
pub fn classify_columns(rows: &[Row], columns: &[String], config: &PipelineConfig) -> ColumnTypes {
    let entries: Vec<ColumnClassification> = columns
        .iter()
        .map(|column| ColumnClassification {
            column: column.clone(),
            kind: classify_column(rows, column, config),
        })
        .collect();

    debug!(
        columns = entries.len(),
        rows = rows.len(),
        "classified dataset columns"
    );
    ColumnTypes::new(entries)
}

/// Classifies every column of a dataset.
#[must_use]
pub fn classify(dataset: &Dataset, config: &PipelineConfig) -> ColumnTypes {
    classify_columns(dataset.rows(), dataset.columns(), config)
}
