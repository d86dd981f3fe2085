//! User settings.
//!
//! Settings are addressed by flat keys (`theme`, `pipeline.page_size`, ...)
//! so they can be read and written from the command line.

use glimpsy_analytics::{DateMatch, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

// =============================================================================
// THEME AND FORMAT
// =============================================================================

/// Dashboard colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Blue ocean.
    #[default]
    Blue,
    /// Purple.
    Purple,
    /// Green.
    Green,
    /// Dark mode.
    Dark,
    /// Light mode.
    Light,
}

impl Theme {
    /// All themes.
    pub const ALL: [Self; 5] = [Self::Blue, Self::Purple, Self::Green, Self::Dark, Self::Light];

    /// Lowercase identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ConfigError::invalid_value("theme", s, "blue, purple, green, dark or light")
            })
    }
}

/// Preferred output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatPreference {
    /// Human-readable table.
    #[default]
    Table,
    /// JSON.
    Json,
    /// CSV.
    Csv,
    /// Bare values.
    Minimal,
}

impl FormatPreference {
    /// All formats.
    pub const ALL: [Self; 4] = [Self::Table, Self::Json, Self::Csv, Self::Minimal];

    /// Lowercase identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Minimal => "minimal",
        }
    }
}

impl fmt::Display for FormatPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatPreference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                ConfigError::invalid_value("default_format", s, "table, json, csv or minimal")
            })
    }
}

// =============================================================================
// SETTING KEYS
// =============================================================================

/// Addressable settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    /// Colour theme.
    Theme,
    /// Save settings on every change.
    AutoSave,
    /// Show notifications.
    Notifications,
    /// Default output format.
    DefaultFormat,
    /// Decimal places in displayed numbers.
    DecimalPrecision,
    /// Classification sample size.
    SampleSize,
    /// Numeric share needed for a numerical column.
    NumericRatio,
    /// Unique share below which a column is categorical.
    UniqueRatio,
    /// Distinct value cap for categorical columns.
    MaxCategoricalUniques,
    /// Column-name keywords marking date columns.
    DateKeywords,
    /// Option cap for categorical filters.
    MaxFilterOptions,
    /// Numeric columns in comparisons.
    ComparisonColumns,
    /// Rows per table page.
    PageSize,
    /// Date range semantics.
    DateMatch,
}

impl SettingKey {
    /// Every key, in display order.
    pub const ALL: [Self; 14] = [
        Self::Theme,
        Self::AutoSave,
        Self::Notifications,
        Self::DefaultFormat,
        Self::DecimalPrecision,
        Self::SampleSize,
        Self::NumericRatio,
        Self::UniqueRatio,
        Self::MaxCategoricalUniques,
        Self::DateKeywords,
        Self::MaxFilterOptions,
        Self::ComparisonColumns,
        Self::PageSize,
        Self::DateMatch,
    ];

    /// Parses a key; pipeline keys accept the bare name too.
    pub fn parse(s: &str) -> ConfigResult<Self> {
        let wanted = s.trim().to_lowercase();
        let bare = wanted.strip_prefix("pipeline.").unwrap_or(&wanted);
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted || k.as_str().trim_start_matches("pipeline.") == bare)
            .ok_or_else(|| ConfigError::unknown_key(s))
    }

    /// Canonical key name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::AutoSave => "auto_save",
            Self::Notifications => "notifications",
            Self::DefaultFormat => "default_format",
            Self::DecimalPrecision => "decimal_precision",
            Self::SampleSize => "pipeline.sample_size",
            Self::NumericRatio => "pipeline.numeric_ratio",
            Self::UniqueRatio => "pipeline.unique_ratio",
            Self::MaxCategoricalUniques => "pipeline.max_categorical_uniques",
            Self::DateKeywords => "pipeline.date_keywords",
            Self::MaxFilterOptions => "pipeline.max_filter_options",
            Self::ComparisonColumns => "pipeline.comparison_columns",
            Self::PageSize => "pipeline.page_size",
            Self::DateMatch => "pipeline.date_match",
        }
    }

    /// One-line help text.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Theme => "Colour theme (blue, purple, green, dark, light)",
            Self::AutoSave => "Save settings on every change (true, false)",
            Self::Notifications => "Show notifications (true, false)",
            Self::DefaultFormat => "Default output format (table, json, csv, minimal)",
            Self::DecimalPrecision => "Decimal places in displayed numbers (0-10)",
            Self::SampleSize => "Rows sampled per column when classifying",
            Self::NumericRatio => "Share of parseable samples for a numerical column (0-1)",
            Self::UniqueRatio => "Unique share below which a column is categorical (0-1)",
            Self::MaxCategoricalUniques => "Most distinct values a categorical column may have",
            Self::DateKeywords => "Comma-separated column-name keywords marking dates",
            Self::MaxFilterOptions => "Most options offered by a categorical filter",
            Self::ComparisonColumns => "Numeric columns reported in comparisons",
            Self::PageSize => "Rows per table page",
            Self::DateMatch => "Date range across several date columns (any, all)",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Persistent user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Colour theme.
    pub theme: Theme,
    /// Save settings on every change.
    pub auto_save: bool,
    /// Show notifications.
    pub notifications: bool,
    /// Default output format.
    pub default_format: FormatPreference,
    /// Decimal places in displayed numbers.
    pub decimal_precision: u8,
    /// Pipeline thresholds.
    pub pipeline: PipelineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Blue,
            auto_save: true,
            notifications: true,
            default_format: FormatPreference::Table,
            decimal_precision: 2,
            pipeline: PipelineConfig::default(),
        }
    }
}

fn parse_bool(key: SettingKey, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_value(key.as_str(), value, "true or false")),
    }
}

fn parse_parsed<T: FromStr>(key: SettingKey, value: &str, expected: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid_value(key.as_str(), value, expected))
}

impl Settings {
    /// Current value of a key, rendered as text.
    #[must_use]
    pub fn get(&self, key: SettingKey) -> String {
        let p = &self.pipeline;
        match key {
            SettingKey::Theme => self.theme.to_string(),
            SettingKey::AutoSave => self.auto_save.to_string(),
            SettingKey::Notifications => self.notifications.to_string(),
            SettingKey::DefaultFormat => self.default_format.to_string(),
            SettingKey::DecimalPrecision => self.decimal_precision.to_string(),
            SettingKey::SampleSize => p.sample_size.to_string(),
            SettingKey::NumericRatio => p.numeric_ratio.to_string(),
            SettingKey::UniqueRatio => p.unique_ratio.to_string(),
            SettingKey::MaxCategoricalUniques => p.max_categorical_uniques.to_string(),
            SettingKey::DateKeywords => p.date_keywords.join(","),
            SettingKey::MaxFilterOptions => p.max_filter_options.to_string(),
            SettingKey::ComparisonColumns => p.comparison_columns.to_string(),
            SettingKey::PageSize => p.page_size.to_string(),
            SettingKey::DateMatch => p.date_match.to_string(),
        }
    }

    /// Parses and stores a value, leaving the settings unchanged on error.
    pub fn set(&mut self, key: SettingKey, value: &str) -> ConfigResult<()> {
        let mut next = self.clone();
        let p = &mut next.pipeline;
        match key {
            SettingKey::Theme => next.theme = value.parse()?,
            SettingKey::AutoSave => next.auto_save = parse_bool(key, value)?,
            SettingKey::Notifications => next.notifications = parse_bool(key, value)?,
            SettingKey::DefaultFormat => next.default_format = value.parse()?,
            SettingKey::DecimalPrecision => {
                next.decimal_precision = parse_parsed(key, value, "an integer from 0 to 10")?;
            }
            SettingKey::SampleSize => p.sample_size = parse_parsed(key, value, "a positive integer")?,
            SettingKey::NumericRatio => p.numeric_ratio = parse_parsed(key, value, "a number")?,
            SettingKey::UniqueRatio => p.unique_ratio = parse_parsed(key, value, "a number")?,
            SettingKey::MaxCategoricalUniques => {
                p.max_categorical_uniques = parse_parsed(key, value, "an integer")?;
            }
            SettingKey::DateKeywords => {
                p.date_keywords = value
                    .split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_lowercase)
                    .collect();
            }
            SettingKey::MaxFilterOptions => {
                p.max_filter_options = parse_parsed(key, value, "an integer")?;
            }
            SettingKey::ComparisonColumns => {
                p.comparison_columns = parse_parsed(key, value, "an integer")?;
            }
            SettingKey::PageSize => p.page_size = parse_parsed(key, value, "a positive integer")?,
            SettingKey::DateMatch => {
                p.date_match = value.parse::<DateMatch>().map_err(|_| {
                    ConfigError::invalid_value(key.as_str(), value, "any or all")
                })?;
            }
        }
        next.validate_or_error()?;
        *self = next;
        Ok(())
    }

    /// Restores one key to its default.
    pub fn reset(&mut self, key: SettingKey) {
        let defaults = Self::default();
        let d = defaults.pipeline;
        let p = &mut self.pipeline;
        match key {
            SettingKey::Theme => self.theme = defaults.theme,
            SettingKey::AutoSave => self.auto_save = defaults.auto_save,
            SettingKey::Notifications => self.notifications = defaults.notifications,
            SettingKey::DefaultFormat => self.default_format = defaults.default_format,
            SettingKey::DecimalPrecision => self.decimal_precision = defaults.decimal_precision,
            SettingKey::SampleSize => p.sample_size = d.sample_size,
            SettingKey::NumericRatio => p.numeric_ratio = d.numeric_ratio,
            SettingKey::UniqueRatio => p.unique_ratio = d.unique_ratio,
            SettingKey::MaxCategoricalUniques => {
                p.max_categorical_uniques = d.max_categorical_uniques;
            }
            SettingKey::DateKeywords => p.date_keywords = d.date_keywords,
            SettingKey::MaxFilterOptions => p.max_filter_options = d.max_filter_options,
            SettingKey::ComparisonColumns => p.comparison_columns = d.comparison_columns,
            SettingKey::PageSize => p.page_size = d.page_size,
            SettingKey::DateMatch => p.date_match = d.date_match,
        }
    }

    /// Every key with its current value.
    #[must_use]
    pub fn entries(&self) -> Vec<(SettingKey, String)> {
        SettingKey::ALL.iter().map(|k| (*k, self.get(*k))).collect()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.decimal_precision > 10 {
            errors.push(ValidationError::with_rule(
                "decimal_precision",
                format!("Decimal precision {} exceeds maximum of 10", self.decimal_precision),
                "max_precision",
            ));
        }

        if let Err(err) = self.pipeline.validate() {
            errors.push(ValidationError::with_rule(
                "pipeline",
                err.to_string(),
                "valid_pipeline",
            ));
        }

        if self.pipeline.comparison_columns == 0 {
            errors.push(ValidationError::with_rule(
                "pipeline.comparison_columns",
                "At least one comparison column is required",
                "min_columns",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Blue);
        assert!(settings.auto_save);
        assert!(settings.notifications);
        assert_eq!(settings.default_format, FormatPreference::Table);
        assert!(settings.is_valid());
    }

    #[test]
    fn test_partial_json() {
        let settings: Settings =
            serde_json::from_str(r#"{"theme": "dark", "pipeline": {"page_size": 25}}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.pipeline.page_size, 25);
        assert_eq!(settings.pipeline.sample_size, 100);
        assert!(settings.auto_save);
    }

    #[test]
    fn test_key_parsing() {
        assert_eq!(SettingKey::parse("theme").unwrap(), SettingKey::Theme);
        assert_eq!(SettingKey::parse("pipeline.page_size").unwrap(), SettingKey::PageSize);
        assert_eq!(SettingKey::parse("PAGE_SIZE").unwrap(), SettingKey::PageSize);
        assert!(matches!(
            SettingKey::parse("colour"),
            Err(ConfigError::UnknownKey { .. })
        ));
    }

    #[test]
    fn test_set_and_get() {
        let mut settings = Settings::default();
        settings.set(SettingKey::Theme, "Purple").unwrap();
        settings.set(SettingKey::AutoSave, "no").unwrap();
        settings.set(SettingKey::DateMatch, "all").unwrap();
        settings.set(SettingKey::DateKeywords, "Date, opened ,").unwrap();

        assert_eq!(settings.get(SettingKey::Theme), "purple");
        assert_eq!(settings.get(SettingKey::AutoSave), "false");
        assert_eq!(settings.pipeline.date_match, DateMatch::All);
        assert_eq!(settings.get(SettingKey::DateKeywords), "date,opened");
    }

    #[test]
    fn test_set_rejects_invalid() {
        let mut settings = Settings::default();
        assert!(settings.set(SettingKey::Theme, "orange").is_err());
        assert!(settings.set(SettingKey::PageSize, "0").is_err());
        assert!(settings.set(SettingKey::NumericRatio, "1.5").is_err());
        assert!(settings.set(SettingKey::DecimalPrecision, "11").is_err());
        assert!(settings.set(SettingKey::Notifications, "maybe").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_reset() {
        let mut settings = Settings::default();
        settings.set(SettingKey::PageSize, "50").unwrap();
        settings.reset(SettingKey::PageSize);
        assert_eq!(settings.pipeline.page_size, 10);
    }

    #[test]
    fn test_entries_cover_all_keys() {
        let entries = Settings::default().entries();
        assert_eq!(entries.len(), SettingKey::ALL.len());
        assert_eq!(entries[0], (SettingKey::Theme, "blue".to_string()));
    }
}
