//! Column kinds and per-dataset classification results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Date-like column, detected by name.
    Date,
    /// Mostly numeric values.
    Numerical,
    /// Few distinct values.
    Categorical,
    /// Anything else, including columns with no sampled values.
    Text,
}

impl ColumnKind {
    /// Lowercase name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Numerical => "numerical",
            Self::Categorical => "categorical",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnClassification {
    /// Column name.
    pub column: String,
    /// Inferred kind.
    pub kind: ColumnKind,
}

/// Classification of every column of a dataset, in dataset column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnTypes {
    entries: Vec<ColumnClassification>,
}

impl ColumnTypes {
    /// Builds from classifications in column order.
    #[must_use]
    pub fn new(entries: Vec<ColumnClassification>) -> Self {
        Self { entries }
    }

    /// Kind of the named column, if it was classified.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<ColumnKind> {
        self.entries
            .iter()
            .find(|e| e.column == column)
            .map(|e| e.kind)
    }

    /// All classifications in column order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnClassification> {
        self.entries.iter()
    }

    /// Columns of one kind, in column order.
    #[must_use]
    pub fn of_kind(&self, kind: ColumnKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.column.as_str())
            .collect()
    }

    /// Date columns.
    #[must_use]
    pub fn dates(&self) -> Vec<&str> {
        self.of_kind(ColumnKind::Date)
    }

    /// Numerical columns.
    #[must_use]
    pub fn numerical(&self) -> Vec<&str> {
        self.of_kind(ColumnKind::Numerical)
    }

    /// Categorical columns.
    #[must_use]
    pub fn categorical(&self) -> Vec<&str> {
        self.of_kind(ColumnKind::Categorical)
    }

    /// Text columns.
    #[must_use]
    pub fn text(&self) -> Vec<&str> {
        self.of_kind(ColumnKind::Text)
    }

    /// Number of classified columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no columns were classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColumnTypes {
        ColumnTypes::new(vec![
            ColumnClassification {
                column: "origination_date".into(),
                kind: ColumnKind::Date,
            },
            ColumnClassification {
                column: "bank_name".into(),
                kind: ColumnKind::Categorical,
            },
            ColumnClassification {
                column: "principal_amount".into(),
                kind: ColumnKind::Numerical,
            },
            ColumnClassification {
                column: "maturity_date".into(),
                kind: ColumnKind::Date,
            },
        ])
    }

    #[test]
    fn test_grouping_keeps_order() {
        let types = sample();
        assert_eq!(types.dates(), vec!["origination_date", "maturity_date"]);
        assert_eq!(types.numerical(), vec!["principal_amount"]);
        assert!(types.text().is_empty());
        assert_eq!(types.get("bank_name"), Some(ColumnKind::Categorical));
        assert_eq!(types.get("missing"), None);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert!(json.contains("\"kind\":\"categorical\""));
        assert!(json.starts_with('['));
    }
}
