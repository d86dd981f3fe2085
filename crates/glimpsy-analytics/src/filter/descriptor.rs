//! Declarative filter constraints.

use crate::types::DateMatch;
use glimpsy_core::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel meaning "every value" in categorical selections.
pub const ALL_SENTINEL: &str = "all";

/// Allowed values of a categorical filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// No constraint.
    #[default]
    All,
    /// Only these exact display values.
    Only(BTreeSet<String>),
}

impl Selection {
    /// Builds a selection from raw UI values.
    ///
    /// An empty list, or a list containing the `all` sentinel in any case,
    /// selects everything.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() || values.iter().any(|v| v.eq_ignore_ascii_case(ALL_SENTINEL)) {
            Self::All
        } else {
            Self::Only(values)
        }
    }

    /// True if the selection imposes no constraint.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        match self {
            Self::All => true,
            Self::Only(values) => values.is_empty(),
        }
    }

    /// True if a display value passes the selection.
    #[must_use]
    pub fn allows(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(values) => values.is_empty() || values.contains(value),
        }
    }
}

/// Inclusive numeric bounds; an absent side is unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericBounds {
    /// Lower bound, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound, inclusive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericBounds {
    /// Creates bounds.
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// True if neither side is bounded.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// True if the value satisfies every present bound.
    ///
    /// A missing reading fails any present bound.
    #[must_use]
    pub fn contains(&self, value: Option<f64>) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let Some(v) = value else {
            return false;
        };
        self.min.map_or(true, |min| v >= min) && self.max.map_or(true, |max| v <= max)
    }
}

/// The constraint a descriptor imposes on its column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// Value must be one of the selected display strings.
    Categorical {
        /// Allowed values.
        selection: Selection,
    },
    /// Numeric reading must lie within the bounds.
    Numerical {
        /// Inclusive bounds.
        bounds: NumericBounds,
    },
}

/// A filter on one column, gated by an enabled flag.
///
/// Disabled descriptors are never evaluated, whatever they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    /// Column the filter reads.
    pub column: String,
    /// Whether the filter takes part in evaluation.
    pub enabled: bool,
    /// The constraint.
    pub constraint: Constraint,
}

impl FilterDescriptor {
    /// An enabled categorical filter.
    pub fn categorical<I, S>(column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            column: column.into(),
            enabled: true,
            constraint: Constraint::Categorical {
                selection: Selection::from_values(values),
            },
        }
    }

    /// An enabled numerical filter.
    #[must_use]
    pub fn numerical(column: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            column: column.into(),
            enabled: true,
            constraint: Constraint::Numerical {
                bounds: NumericBounds::new(min, max),
            },
        }
    }

    /// Sets the enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// True if this descriptor can never exclude a row.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        if !self.enabled {
            return true;
        }
        match &self.constraint {
            Constraint::Categorical { selection } => selection.is_unconstrained(),
            Constraint::Numerical { bounds } => bounds.is_unbounded(),
        }
    }

    /// True for categorical descriptors.
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self.constraint, Constraint::Categorical { .. })
    }

    /// Evaluates the descriptor against one row.
    ///
    /// A row without the column satisfies the filter vacuously.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        if self.is_identity() {
            return true;
        }
        let Some(value) = row.get(&self.column) else {
            return true;
        };
        match &self.constraint {
            Constraint::Categorical { selection } => selection.allows(&value.display_string()),
            Constraint::Numerical { bounds } => bounds.contains(value.as_number()),
        }
    }
}

/// A shared date window over one or more date columns.
///
/// Bounds are ISO-8601 strings compared lexicographically against each
/// cell's display string, both ends inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Inclusive start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Inclusive end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Date columns the window applies to.
    #[serde(default)]
    pub fields: Vec<String>,
    /// How several fields combine.
    #[serde(default)]
    pub mode: DateMatch,
}

impl DateRange {
    /// An unbounded range over the given date columns.
    pub fn over<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the start bound. Blank strings clear it.
    #[must_use]
    pub fn with_start(mut self, start: Option<impl Into<String>>) -> Self {
        self.start = start.map(Into::into).filter(|s: &String| !s.trim().is_empty());
        self
    }

    /// Sets the end bound. Blank strings clear it.
    #[must_use]
    pub fn with_end(mut self, end: Option<impl Into<String>>) -> Self {
        self.end = end.map(Into::into).filter(|s: &String| !s.trim().is_empty());
        self
    }

    /// Sets the match mode.
    #[must_use]
    pub fn with_mode(mut self, mode: DateMatch) -> Self {
        self.mode = mode;
        self
    }

    /// True if neither bound is set or no field is covered.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        (self.start.is_none() && self.end.is_none()) || self.fields.is_empty()
    }

    /// True if a date string lies within the window.
    #[must_use]
    pub fn contains(&self, date: &str) -> bool {
        self.start.as_deref().map_or(true, |s| date >= s)
            && self.end.as_deref().map_or(true, |e| date <= e)
    }

    /// Evaluates the window against one row.
    ///
    /// Only the fields the row carries are consulted; a row carrying none
    /// of them passes.
    #[must_use]
    pub fn matches(&self, row: &Row) -> bool {
        if self.is_unbounded() {
            return true;
        }
        let mut present = self
            .fields
            .iter()
            .filter_map(|field| row.get(field))
            .map(|value| value.display_string())
            .peekable();
        if present.peek().is_none() {
            return true;
        }
        match self.mode {
            DateMatch::Any => present.any(|d| self.contains(&d)),
            DateMatch::All => present.all(|d| self.contains(&d)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpsy_core::Value;

    #[test]
    fn test_selection_sentinel() {
        assert_eq!(Selection::from_values(["Active", "ALL"]), Selection::All);
        assert_eq!(Selection::from_values(Vec::<String>::new()), Selection::All);
        let only = Selection::from_values(["Active"]);
        assert!(only.allows("Active"));
        assert!(!only.allows("active"));
        assert!(!only.is_unconstrained());
    }

    #[test]
    fn test_bounds_inclusive() {
        let bounds = NumericBounds::new(Some(10.0), Some(20.0));
        assert!(bounds.contains(Some(10.0)));
        assert!(bounds.contains(Some(20.0)));
        assert!(!bounds.contains(Some(20.01)));
        assert!(!bounds.contains(None));

        let open = NumericBounds::default();
        assert!(open.contains(None));

        let lower = NumericBounds::new(Some(0.0), None);
        assert!(lower.contains(Some(1e12)));
        assert!(!lower.contains(Some(-1.0)));
    }

    #[test]
    fn test_descriptor_missing_column_is_vacuous() {
        let desc = FilterDescriptor::numerical("x", Some(1.0), None);
        assert!(desc.matches(&Row::new().with("y", 0.0)));
        assert!(!desc.matches(&Row::new().with("x", 0.0)));
        assert!(!desc.matches(&Row::new().with("x", Value::Null)));
        assert!(!desc.matches(&Row::new().with("x", "abc")));
    }

    #[test]
    fn test_disabled_descriptor_never_evaluated() {
        let desc = FilterDescriptor::categorical("status", ["Active"]).with_enabled(false);
        assert!(desc.is_identity());
        assert!(desc.matches(&Row::new().with("status", "Matured")));
    }

    #[test]
    fn test_categorical_matches_display_string() {
        let desc = FilterDescriptor::categorical("term_months", ["12"]);
        assert!(desc.matches(&Row::new().with("term_months", 12.0)));
        assert!(!desc.matches(&Row::new().with("term_months", 6.0)));
    }

    #[test]
    fn test_date_range_any_and_all() {
        let row = Row::new()
            .with("origination_date", "2023-06-01")
            .with("maturity_date", "2024-06-01");
        let range = DateRange::over(["origination_date", "maturity_date"])
            .with_start(Some("2024-01-01"))
            .with_end(Some("2024-12-31"));

        assert!(range.matches(&row));
        assert!(!range.clone().with_mode(DateMatch::All).matches(&row));
    }

    #[test]
    fn test_date_range_bounds_inclusive() {
        let range = DateRange::over(["date"])
            .with_start(Some("2024-03-01"))
            .with_end(Some("2024-03-31"));
        assert!(range.matches(&Row::new().with("date", "2024-03-01")));
        assert!(range.matches(&Row::new().with("date", "2024-03-31")));
        assert!(!range.matches(&Row::new().with("date", "2024-04-01")));
        assert!(!range.matches(&Row::new().with("date", Value::Null)));
        assert!(range.matches(&Row::new().with("other", "x")));
    }

    #[test]
    fn test_blank_bounds_are_cleared() {
        let range = DateRange::over(["date"]).with_start(Some("  ")).with_end(None::<String>);
        assert!(range.is_unbounded());
    }
}
