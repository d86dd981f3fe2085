//! Datasets and the dataset API record shape.

use crate::error::{CoreError, CoreResult};
use crate::row::Row;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered sequence of rows sharing one ordered column set.
///
/// The row count is always the length of the row sequence. Datasets are
/// replaced wholesale rather than mutated; transformations build new ones
/// with [`Dataset::with_rows`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Creates a dataset from an explicit column order and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> CoreResult<Self> {
        validate_columns(&columns)?;
        Ok(Self { columns, rows })
    }

    /// Creates a dataset whose columns are derived from the rows.
    ///
    /// Columns are the union of row keys in first-seen order.
    #[must_use]
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();
        for row in &rows {
            for column in row.columns() {
                if seen.insert(column.to_string()) {
                    columns.push(column.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    /// Creates a dataset and checks a declared row count against the rows.
    pub fn with_declared_count(
        columns: Vec<String>,
        rows: Vec<Row>,
        declared: usize,
    ) -> CoreResult<Self> {
        if declared != rows.len() {
            return Err(CoreError::RowCountMismatch {
                declared,
                actual: rows.len(),
            });
        }
        Self::new(columns, rows)
    }

    /// Returns a dataset with the same columns and a different row set.
    #[must_use]
    pub fn with_rows(&self, rows: Vec<Row>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Column names in dataset order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the dataset, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the dataset has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if the column is part of the dataset schema.
    #[must_use]
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Appends a column name to the schema if it is not already present.
    pub fn ensure_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
    }

    /// Iterates over the cells of one column, skipping rows without it.
    pub fn column_values<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().filter_map(move |row| row.get(column))
    }

    /// All finite numeric readings of a column, in row order.
    #[must_use]
    pub fn numeric_values(&self, column: &str) -> Vec<f64> {
        self.column_values(column)
            .filter_map(Value::as_number)
            .collect()
    }

    /// True if at least one row holds a numeric reading for the column.
    #[must_use]
    pub fn is_numeric_column(&self, column: &str) -> bool {
        self.column_values(column).any(|v| v.as_number().is_some())
    }

    /// Columns that hold at least one numeric reading, in dataset order.
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| self.is_numeric_column(c))
            .cloned()
            .collect()
    }
}

fn validate_columns(columns: &[String]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if column.trim().is_empty() {
            return Err(CoreError::EmptyColumnName);
        }
        if !seen.insert(column.as_str()) {
            return Err(CoreError::duplicate_column(column.clone()));
        }
    }
    Ok(())
}

/// Dataset as served by the dataset API.
///
/// `{id, name, columns, data, row_count}` plus optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    /// Server-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Row payload.
    pub data: Vec<Row>,
    /// Declared row count.
    pub row_count: usize,
    /// Source file type (`csv`, `parquet`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// Upload timestamp as sent by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl DatasetRecord {
    /// Wraps a dataset for transport.
    #[must_use]
    pub fn from_dataset(id: i64, name: impl Into<String>, dataset: &Dataset) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            columns: dataset.columns().to_vec(),
            data: dataset.rows().to_vec(),
            row_count: dataset.row_count(),
            file_type: None,
            created_at: None,
        }
    }

    /// Decodes a record from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the declared row count and builds the dataset.
    pub fn into_dataset(self) -> CoreResult<Dataset> {
        Dataset::with_declared_count(self.columns, self.data, self.row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Row> {
        vec![
            Row::new().with("status", "Active").with("rate", 2.0),
            Row::new().with("status", "Matured").with("rate", "n/a"),
            Row::new().with("status", "Active").with("rate", 1.5),
        ]
    }

    #[test]
    fn test_new_and_accessors() {
        let ds = Dataset::new(vec!["status".into(), "rate".into()], sample_rows()).unwrap();
        assert_eq!(ds.row_count(), 3);
        assert!(ds.has_column("rate"));
        assert!(!ds.has_column("apy"));
        assert_eq!(ds.numeric_values("rate"), vec![2.0, 1.5]);
        assert_eq!(ds.numeric_columns(), vec!["rate".to_string()]);
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let err = Dataset::new(vec!["a".into(), "a".into()], vec![]).unwrap_err();
        assert_eq!(err, CoreError::duplicate_column("a"));

        let err = Dataset::new(vec![" ".into()], vec![]).unwrap_err();
        assert_eq!(err, CoreError::EmptyColumnName);
    }

    #[test]
    fn test_declared_count_mismatch() {
        let err = Dataset::with_declared_count(vec!["status".into()], sample_rows(), 5).unwrap_err();
        assert_eq!(
            err,
            CoreError::RowCountMismatch {
                declared: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_rows_derives_columns() {
        let rows = vec![
            Row::new().with("b", 1.0),
            Row::new().with("a", 2.0).with("b", 3.0),
        ];
        let ds = Dataset::from_rows(rows);
        assert_eq!(ds.columns(), &["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_with_rows_keeps_schema() {
        let ds = Dataset::new(vec!["status".into(), "rate".into()], sample_rows()).unwrap();
        let subset = ds.with_rows(ds.rows()[..1].to_vec());
        assert_eq!(subset.columns(), ds.columns());
        assert_eq!(subset.row_count(), 1);
        assert_eq!(ds.row_count(), 3);
    }

    #[test]
    fn test_record_round_trip() {
        let json = r#"{
            "id": 7,
            "name": "CD Book",
            "columns": ["status", "rate"],
            "data": [{"status": "Active", "rate": 2.0}],
            "row_count": 1,
            "file_type": "csv"
        }"#;
        let record = DatasetRecord::from_json(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.file_type.as_deref(), Some("csv"));

        let ds = record.into_dataset().unwrap();
        assert_eq!(ds.row_count(), 1);
        assert_eq!(ds.columns()[1], "rate");
    }

    #[test]
    fn test_record_with_wrong_count() {
        let json = r#"{"id": 1, "name": "x", "columns": ["a"], "data": [], "row_count": 2}"#;
        let err = DatasetRecord::from_json(json).unwrap().into_dataset().unwrap_err();
        assert!(matches!(err, CoreError::RowCountMismatch { declared: 2, actual: 0 }));
    }
}
