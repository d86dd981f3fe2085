//! A single dataset record.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One record of a dataset: column name to cell value.
///
/// A column that is absent from the row is distinct from a column holding
/// [`Value::Null`]; filters treat the former as vacuously satisfied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, Value>);

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(column.into(), value.into());
        self
    }

    /// Sets a cell, returning the previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(column.into(), value.into())
    }

    /// Returns the cell for a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.0.get(column)
    }

    /// True if the row carries the column at all (even as null).
    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Numeric reading of a cell.
    #[must_use]
    pub fn number(&self, column: &str) -> Option<f64> {
        self.get(column).and_then(Value::as_number)
    }

    /// Display string of a cell; absent cells render empty.
    #[must_use]
    pub fn display(&self, column: &str) -> String {
        self.get(column).map(Value::display_string).unwrap_or_default()
    }

    /// Column names present in this row, in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of cells in the row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_accessors() {
        let row = Row::new()
            .with("principal_amount", 10_000.0)
            .with("status", "Active")
            .with("maturity_date", Value::Null);

        assert_eq!(row.len(), 3);
        assert_eq!(row.number("principal_amount"), Some(10_000.0));
        assert_eq!(row.number("status"), None);
        assert_eq!(row.display("status"), "Active");
        assert_eq!(row.display("missing"), "");
        assert!(row.contains("maturity_date"));
        assert!(!row.contains("missing"));
    }

    #[test]
    fn test_from_iterator() {
        let row: Row = vec![("a", 1.0), ("b", 2.0)].into_iter().collect();
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_serde_transparent() {
        let row: Row = serde_json::from_str(r#"{"rate": 2.5, "bank": "Citibank"}"#).unwrap();
        assert_eq!(row.number("rate"), Some(2.5));
        let json = serde_json::to_string(&row).unwrap();
        assert!(json.contains("\"bank\":\"Citibank\""));
    }
}
