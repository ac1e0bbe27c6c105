// Reader Settings Engine
// Loads and saves the reader's tunable constants (reading speed, font base, timer delays,
// storage keys) as a JSON file in the platform config directory.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::ReaderConfig;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ReaderConfig, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &ReaderConfig;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine persisting [`ReaderConfig`] as `reader.json`.
pub struct SettingsEngine {
    config_path: String,
    settings: ReaderConfig,
}

impl SettingsEngine {
    /// Uses `path_override` when given, otherwise `<config dir>/reader.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = path_override.unwrap_or_else(|| {
            platform::get_config_dir()
                .join("reader.json")
                .to_string_lossy()
                .to_string()
        });

        Self {
            config_path,
            settings: ReaderConfig::default(),
        }
    }
}

/// Replaces the value at a dot-separated path inside a JSON object tree.
/// Only existing keys can be replaced.
fn replace_at_path(root: &mut Value, key: &str, value: Value) -> Result<(), SettingsError> {
    let mut parts = key.split('.').peekable();
    let mut current = root;
    while let Some(part) = parts.next() {
        let Value::Object(map) = current else {
            return Err(SettingsError::InvalidKey(format!(
                "Cannot navigate to key '{}': intermediate value is not an object",
                key
            )));
        };
        let Some(slot) = map.get_mut(part) else {
            return Err(SettingsError::InvalidKey(format!(
                "Key '{}' not found in settings",
                key
            )));
        };
        if parts.peek().is_none() {
            *slot = value;
            return Ok(());
        }
        current = slot;
    }
    Err(SettingsError::InvalidKey("Key cannot be empty".to_string()))
}

impl SettingsEngineTrait for SettingsEngine {
    /// Missing file → defaults. Malformed file → serialization error.
    /// Out-of-range values → invalid value error.
    fn load(&mut self) -> Result<ReaderConfig, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            self.settings = ReaderConfig::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        let loaded: ReaderConfig = serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })?;
        loaded.validate().map_err(SettingsError::InvalidValue)?;
        self.settings = loaded;
        tracing::debug!(path = %self.config_path, "reader config loaded");
        Ok(self.settings.clone())
    }

    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }

    fn get_settings(&self) -> &ReaderConfig {
        &self.settings
    }

    /// Updates one value by dot path, e.g. `"timing.hint_ms"` or
    /// `"reading.words_per_minute"`, then saves.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        if key.is_empty() {
            return Err(SettingsError::InvalidKey("Key cannot be empty".to_string()));
        }

        let mut tree = serde_json::to_value(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;
        replace_at_path(&mut tree, key, value)?;

        // Round-trip through the typed config to reject values of the wrong shape.
        let updated: ReaderConfig = serde_json::from_value(tree).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key, e))
        })?;
        updated.validate().map_err(SettingsError::InvalidValue)?;
        self.settings = updated;

        self.save()
    }

    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = ReaderConfig::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
