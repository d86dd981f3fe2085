//! JSON file storage for [`Settings`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigResult, Validate};
use crate::settings::{SettingKey, Settings};

/// Settings persisted as pretty-printed JSON at a fixed path.
///
/// A missing file reads as the defaults; nothing is written until the first
/// change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads and validates the settings.
    pub fn load(&self) -> ConfigResult<Settings> {
        if !self.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate_or_error()?;
        Ok(settings)
    }

    /// Validates and writes the settings, creating parent directories.
    pub fn save(&self, settings: &Settings) -> ConfigResult<()> {
        settings.validate_or_error()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Sets one key and persists the result.
    pub fn set(&self, key: SettingKey, value: &str) -> ConfigResult<Settings> {
        let mut settings = self.load()?;
        settings.set(key, value)?;
        self.save(&settings)?;
        Ok(settings)
    }

    /// Resets one key, or every key when `key` is `None`, and persists.
    pub fn reset(&self, key: Option<SettingKey>) -> ConfigResult<Settings> {
        let settings = match key {
            Some(key) => {
                let mut settings = self.load()?;
                settings.reset(key);
                settings
            }
            None => Settings::default(),
        };
        self.save(&settings)?;
        Ok(settings)
    }
}
