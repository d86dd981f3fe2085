//! Wire-form filter requests.
//!
//! The dashboard sends filters to the dataset service as one JSON object:
//!
//! ```json
//! {
//!   "start_date": "2024-01-01",
//!   "end_date": "2024-12-31",
//!   "bank_name": ["Citibank", "Ally Bank"],
//!   "principal_amount": {"min": 10000, "max": 250000},
//!   "status": "Active"
//! }
//! ```
//!
//! [`FilterRequest::resolve`] turns that object into a [`FilterSet`] the
//! local engine can evaluate.

use super::descriptor::{Constraint, DateRange, FilterDescriptor, Selection};
use super::engine::FilterSet;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::types::PipelineConfig;
use glimpsy_core::{parse_number, Dataset, Value};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};
use tracing::warn;

/// Key carrying the date window start.
pub const START_DATE_KEY: &str = "start_date";
/// Key carrying the date window end.
pub const END_DATE_KEY: &str = "end_date";

/// A filter object in the dataset service's wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterRequest(Map<String, JsonValue>);

impl FilterRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a request, which must be a JSON object.
    pub fn from_json(json: &str) -> AnalyticsResult<Self> {
        match serde_json::from_str::<JsonValue>(json)? {
            JsonValue::Object(map) => Ok(Self(map)),
            other => Err(AnalyticsError::invalid_request(format!(
                "expected a JSON object, got {}",
                json_type(&other)
            ))),
        }
    }

    /// Sets the date window.
    #[must_use]
    pub fn with_date_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        for (key, value) in [(START_DATE_KEY, start), (END_DATE_KEY, end)] {
            match value {
                Some(v) => self.0.insert(key.to_string(), json!(v)),
                None => self.0.remove(key),
            };
        }
        self
    }

    /// Adds a list of allowed values for a column.
    #[must_use]
    pub fn with_values<I, S>(mut self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        self.0.insert(column.to_string(), json!(values));
        self
    }

    /// Adds numeric bounds for a column.
    #[must_use]
    pub fn with_bounds(mut self, column: &str, min: Option<f64>, max: Option<f64>) -> Self {
        let mut bounds = Map::new();
        if let Some(min) = min {
            bounds.insert("min".into(), json!(min));
        }
        if let Some(max) = max {
            bounds.insert("max".into(), json!(max));
        }
        self.0.insert(column.to_string(), JsonValue::Object(bounds));
        self
    }

    /// Start of the date window, if set and non-blank.
    #[must_use]
    pub fn start_date(&self) -> Option<&str> {
        self.date_key(START_DATE_KEY)
    }

    /// End of the date window, if set and non-blank.
    #[must_use]
    pub fn end_date(&self) -> Option<&str> {
        self.date_key(END_DATE_KEY)
    }

    fn date_key(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Number of keys in the request.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the request carries no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the request as compact JSON.
    pub fn to_json(&self) -> AnalyticsResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Converts the request into a filter set for a dataset.
    ///
    /// `date_fields` are the columns the date window covers. Columns outside
    /// the dataset schema and empty values are skipped; a bound that is not
    /// a number is an error.
    pub fn resolve(
        &self,
        dataset: &Dataset,
        date_fields: &[String],
        config: &PipelineConfig,
    ) -> AnalyticsResult<FilterSet> {
        let date_range = DateRange::over(date_fields.iter().cloned())
            .with_start(self.start_date())
            .with_end(self.end_date())
            .with_mode(config.date_match);

        let mut descriptors = Vec::new();
        for (column, value) in &self.0 {
            if column == START_DATE_KEY || column == END_DATE_KEY {
                continue;
            }
            if !dataset.has_column(column) {
                warn!(column = %column, "filter request references unknown column, skipping");
                continue;
            }
            if let Some(descriptor) = descriptor_for(column, value)? {
                descriptors.push(descriptor);
            }
        }

        Ok(FilterSet::new(date_range, descriptors))
    }

    /// Builds the wire form of a filter set. Disabled and identity
    /// descriptors are left out.
    #[must_use]
    pub fn from_filter_set(filters: &FilterSet) -> Self {
        let mut request = Self::new().with_date_range(
            filters.date_range.start.as_deref(),
            filters.date_range.end.as_deref(),
        );
        for descriptor in filters.descriptors.iter().filter(|d| !d.is_identity()) {
            request = match &descriptor.constraint {
                Constraint::Categorical {
                    selection: Selection::Only(values),
                } => request.with_values(&descriptor.column, values.iter().cloned()),
                Constraint::Categorical { .. } => request,
                Constraint::Numerical { bounds } => {
                    request.with_bounds(&descriptor.column, bounds.min, bounds.max)
                }
            };
        }
        request
    }
}

fn descriptor_for(column: &str, value: &JsonValue) -> AnalyticsResult<Option<FilterDescriptor>> {
    let descriptor = match value {
        JsonValue::Null => None,
        JsonValue::Array(items) => {
            let values: Vec<String> = items.iter().filter_map(scalar_text).collect();
            (!values.is_empty()).then(|| FilterDescriptor::categorical(column, values))
        }
        JsonValue::Object(bounds) => {
            let min = bound(column, "min", bounds.get("min"))?;
            let max = bound(column, "max", bounds.get("max"))?;
            (min.is_some() || max.is_some()).then(|| FilterDescriptor::numerical(column, min, max))
        }
        scalar => scalar_text(scalar).map(|v| FilterDescriptor::categorical(column, [v])),
    };
    Ok(descriptor)
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    let text = match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.as_f64().map(|f| Value::from(f).display_string())?,
        JsonValue::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.trim().is_empty()).then_some(text)
}

fn bound(column: &str, name: &str, value: Option<&JsonValue>) -> AnalyticsResult<Option<f64>> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::Number(n)) => Ok(n.as_f64()),
        Some(JsonValue::String(s)) if s.trim().is_empty() => Ok(None),
        Some(JsonValue::String(s)) => parse_number(s)
            .map(Some)
            .ok_or_else(|| AnalyticsError::invalid_bound(column, name, s.clone())),
        Some(other) => Err(AnalyticsError::invalid_bound(column, name, other.to_string())),
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NumericBounds;
    use glimpsy_core::Row;

    fn dataset() -> Dataset {
        Dataset::from_rows(vec![Row::new()
            .with("origination_date", "2024-01-01")
            .with("bank_name", "Citibank")
            .with("principal_amount", 50_000.0)
            .with("status", "Active")
            .with("term_months", 12.0)])
    }

    fn descriptor<'a>(set: &'a FilterSet, column: &str) -> &'a FilterDescriptor {
        set.descriptors.iter().find(|d| d.column == column).unwrap()
    }

    #[test]
    fn test_resolve_all_shapes() {
        let request = FilterRequest::from_json(
            r#"{
                "start_date": "2024-01-01",
                "end_date": "",
                "bank_name": ["Citibank", "Ally Bank"],
                "principal_amount": {"min": "10000", "max": 250000},
                "status": "Active",
                "term_months": 12,
                "region": ["North"]
            }"#,
        )
        .unwrap();

        let fields = vec!["origination_date".to_string()];
        let set = request
            .resolve(&dataset(), &fields, &PipelineConfig::default())
            .unwrap();

        assert_eq!(set.date_range.start.as_deref(), Some("2024-01-01"));
        assert_eq!(set.date_range.end, None);
        assert_eq!(set.descriptors.len(), 4);

        let bank = descriptor(&set, "bank_name");
        assert!(bank.is_categorical());
        assert!(bank.matches(&Row::new().with("bank_name", "Ally Bank")));

        let principal = descriptor(&set, "principal_amount");
        assert_eq!(
            principal.constraint,
            Constraint::Numerical {
                bounds: NumericBounds::new(Some(10_000.0), Some(250_000.0))
            }
        );

        let term = descriptor(&set, "term_months");
        assert!(term.matches(&Row::new().with("term_months", 12.0)));
    }

    #[test]
    fn test_all_sentinel_and_empty_values() {
        let request = FilterRequest::new()
            .with_values("bank_name", ["All"])
            .with_values("status", Vec::<String>::new())
            .with_bounds("principal_amount", None, None);
        let set = request.resolve(&dataset(), &[], &PipelineConfig::default()).unwrap();
        assert!(set.is_identity());
    }

    #[test]
    fn test_invalid_bound() {
        let request = FilterRequest::from_json(r#"{"principal_amount": {"min": "lots"}}"#).unwrap();
        let err = request
            .resolve(&dataset(), &[], &PipelineConfig::default())
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidBound { .. }));

        let request = FilterRequest::from_json(r#"{"principal_amount": {"max": [1]}}"#).unwrap();
        assert!(request.resolve(&dataset(), &[], &PipelineConfig::default()).is_err());
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(FilterRequest::from_json("[1, 2]").is_err());
        assert!(FilterRequest::from_json("not json").is_err());
    }

    #[test]
    fn test_from_filter_set() {
        let set = FilterSet::new(
            DateRange::over(["origination_date"]).with_start(Some("2024-01-01")),
            vec![
                FilterDescriptor::categorical("status", ["Active"]),
                FilterDescriptor::numerical("principal_amount", Some(1.0), None),
                FilterDescriptor::categorical("bank_name", ["Citibank"]).with_enabled(false),
            ],
        );
        let request = FilterRequest::from_filter_set(&set);
        assert_eq!(request.start_date(), Some("2024-01-01"));
        assert_eq!(request.len(), 3);

        let json = request.to_json().unwrap();
        assert!(json.contains(r#""status":["Active"]"#));
        assert!(json.contains(r#""principal_amount":{"min":1.0}"#));
    }
}
