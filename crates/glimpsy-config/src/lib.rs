//! Glimpsy Configuration Layer
//!
//! User settings for the Glimpsy toolkit: display preferences carried over
//! from the dashboard (theme, auto-save, notifications, number precision),
//! the default output format, and overrides for every pipeline threshold.
//!
//! # Example
//!
//! ```rust
//! use glimpsy_config::{SettingKey, Settings, Theme, Validate};
//!
//! let mut settings = Settings::default();
//! settings.set(SettingKey::Theme, "dark").unwrap();
//! settings.set(SettingKey::PageSize, "25").unwrap();
//!
//! assert_eq!(settings.theme, Theme::Dark);
//! assert_eq!(settings.pipeline.page_size, 25);
//! assert!(settings.is_valid());
//!
//! // Out-of-range values are rejected and leave the settings untouched
//! assert!(settings.set(SettingKey::UniqueRatio, "2.0").is_err());
//! ```
//!
//! Settings persist through [`ConfigStore`], a JSON file at a caller-chosen
//! path.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod settings;
mod store;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{FormatPreference, SettingKey, Settings, Theme};
pub use store::ConfigStore;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::settings::{SettingKey, Settings};
    pub use crate::store::ConfigStore;
}
