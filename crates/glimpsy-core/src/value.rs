//! Scalar cell values and the coercions the pipeline relies on.
//!
//! Cells arrive untyped from CSV uploads and the dataset API, so a column
//! may mix numbers and text. Coercion is lenient: anything that cannot be
//! read as a number or a date simply yields `None` and is left out of
//! numeric work.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single dataset cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value (`null` in JSON).
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Numeric value.
    Number(f64),
    /// Free text, including date-like strings.
    Text(String),
}

impl Value {
    /// Returns the value as a finite number, if it has one.
    ///
    /// Text is read up to the end of its leading number, so `"3.5%"` is
    /// 3.5 and `"12 months"` is 12. Booleans and nulls are not numbers.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Text(s) => parse_leading_number(s),
            _ => None,
        }
    }

    /// Returns the value as a calendar date, if it is a date-like string.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Text(s) => parse_date(s),
            _ => None,
        }
    }

    /// Returns the text payload without conversion.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for nulls and zero-length text. Whitespace is content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Renders the value the way the dashboard shows it.
    ///
    /// Integral numbers print without a fractional part and nulls render as
    /// an empty string.
    #[must_use]
    pub fn display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) if *n == 0.0 => "0".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Builds a value from a raw CSV cell.
    ///
    /// Numeric-looking cells become numbers, everything else stays text.
    #[must_use]
    pub fn from_cell(raw: &str) -> Self {
        match parse_number(raw) {
            Some(n) => Self::Number(n),
            None => Self::Text(raw.trim().to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Self::Text(d.format("%Y-%m-%d").to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

/// Parses trimmed text as a finite `f64`.
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Reads the numeric prefix of `raw`, ignoring leading whitespace and
/// whatever follows the number.
///
/// The prefix is an optional sign, digits with an optional fraction, and an
/// exponent only when digits follow the `e`. Returns `None` when no digits
/// lead the text or the reading is not finite.
#[must_use]
pub fn parse_leading_number(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = leading_digits(&bytes[end..]);
    end += int_digits;

    let frac_digits = if bytes.get(end) == Some(&b'.') {
        leading_digits(&bytes[end + 1..])
    } else {
        0
    };
    if int_digits + frac_digits == 0 {
        return None;
    }
    if bytes.get(end) == Some(&b'.') {
        end += 1 + frac_digits;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = leading_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

fn leading_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Parses an ISO-8601 style date or timestamp, keeping the calendar date.
///
/// Accepted forms: `2024-03-15`, `2024-03-15T10:30:00`, `2024-03-15 10:30:00`
/// (optionally with fractional seconds) and RFC 3339 timestamps with offset.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|ts| ts.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_number() {
        assert_eq!(Value::Number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::from(" 42 ").as_number(), Some(42.0));
        assert_eq!(Value::from("1e3").as_number(), Some(1000.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from("").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::from("3.5%").as_number(), Some(3.5));
        assert_eq!(Value::from("12 months").as_number(), Some(12.0));
        assert_eq!(Value::Bool(true).as_number(), None);
        assert_eq!(Value::Null.as_number(), None);
    }

    #[test]
    fn test_parse_leading_number() {
        assert_eq!(parse_leading_number("3.5%"), Some(3.5));
        assert_eq!(parse_leading_number("12abc"), Some(12.0));
        assert_eq!(parse_leading_number("  100 USD"), Some(100.0));
        assert_eq!(parse_leading_number(".5"), Some(0.5));
        assert_eq!(parse_leading_number("-.25x"), Some(-0.25));
        assert_eq!(parse_leading_number("7."), Some(7.0));
        assert_eq!(parse_leading_number("-2e3x"), Some(-2000.0));
        assert_eq!(parse_leading_number("1e"), Some(1.0));
        assert_eq!(parse_leading_number("4E+2"), Some(400.0));
        assert_eq!(parse_leading_number("123-4567-8901"), Some(123.0));

        assert_eq!(parse_leading_number("abc12"), None);
        assert_eq!(parse_leading_number("."), None);
        assert_eq!(parse_leading_number("-"), None);
        assert_eq!(parse_leading_number("$5"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("1e999"), None);
    }

    #[test]
    fn test_from_cell_stays_strict() {
        assert_eq!(Value::from_cell("3.5%"), Value::Text("3.5%".into()));
        assert_eq!(Value::from_cell(" 3.5 "), Value::Number(3.5));
        assert_eq!(parse_number("12abc"), None);
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Number(12.0).display_string(), "12");
        assert_eq!(Value::Number(1.5).display_string(), "1.5");
        assert_eq!(Value::Number(-0.0).display_string(), "0");
        assert_eq!(Value::Null.display_string(), "");
        assert_eq!(Value::Bool(false).display_string(), "false");
        assert_eq!(Value::from("Active").to_string(), "Active");
    }

    #[test]
    fn test_is_empty() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(!Value::from("   ").is_empty());
        assert!(!Value::from("x").is_empty());
        assert!(!Value::Number(0.0).is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15"), Some(expected));
        assert_eq!(parse_date("2024-03-15T10:30:00"), Some(expected));
        assert_eq!(parse_date("2024-03-15 10:30:00.250"), Some(expected));
        assert_eq!(parse_date("2024-03-15T23:00:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-15T10:30:00+02:00"), Some(expected));
        assert_eq!(parse_date("15/03/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_from_cell() {
        assert_eq!(Value::from_cell("3.25"), Value::Number(3.25));
        assert_eq!(Value::from_cell(" Citibank "), Value::from("Citibank"));
        assert_eq!(Value::from_cell(""), Value::from(""));
    }

    #[test]
    fn test_serde_untagged() {
        let values: Vec<Value> = serde_json::from_str(r#"[null, true, 3, 2.5, "x"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Bool(true),
                Value::Number(3.0),
                Value::Number(2.5),
                Value::from("x"),
            ]
        );
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }
}
