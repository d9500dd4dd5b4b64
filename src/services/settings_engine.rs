// Nemalo Settings Engine
// Schema-validated key/value store for the four browser settings.
// Settings are stored as a JSON object at the platform-specific config path.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde_json::{Map, Value};

use crate::platform;
use crate::types::errors::SettingsError;
use crate::types::settings::{BrowserSettings, SettingKey};

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BrowserSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BrowserSettings;
    fn get_value(&self, key: &str) -> Result<Value, SettingsError>;
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError>;
    fn get_all(&self) -> Result<Value, SettingsError>;
    fn reset(&mut self) -> Result<(), SettingsError>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BrowserSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file.
    /// Otherwise, uses the platform-specific config directory with `settings.json`.
    pub fn new(path_override: Option<String>) -> Self {
        let config_path = match path_override {
            Some(p) => p,
            None => platform::get_config_dir()
                .join("settings.json")
                .to_string_lossy()
                .to_string(),
        };

        Self {
            config_path,
            settings: BrowserSettings::default(),
        }
    }

    /// Moves the config file aside to `<path>.bak`, replacing an older backup,
    /// and returns the backup path. Used before a rejected file would be
    /// overwritten by the next save.
    pub fn back_up_config(&self) -> Result<String, SettingsError> {
        let backup = format!("{}.bak", self.config_path);
        fs::rename(&self.config_path, &backup)
            .map_err(|e| SettingsError::Io(format!("Failed to back up config file: {}", e)))?;
        Ok(backup)
    }

    fn to_object(&self) -> Result<Map<String, Value>, SettingsError> {
        match serde_json::to_value(&self.settings) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(SettingsError::Serialization(
                "settings did not serialize to an object".to_string(),
            )),
            Err(e) => Err(SettingsError::Serialization(format!(
                "Failed to serialize settings: {}",
                e
            ))),
        }
    }

    /// Builds settings from a stored object one key at a time, so a single bad
    /// value falls back to its default instead of discarding the whole file.
    fn validate_stored(stored: Map<String, Value>) -> BrowserSettings {
        let defaults = BrowserSettings::default();
        let mut merged = match serde_json::to_value(&defaults) {
            Ok(Value::Object(map)) => map,
            _ => return defaults,
        };

        for key in SettingKey::ALL {
            let name = key.as_str();
            let Some(value) = stored.get(name) else {
                continue;
            };
            let mut candidate = merged.clone();
            candidate.insert(name.to_string(), value.clone());
            match serde_json::from_value::<BrowserSettings>(Value::Object(candidate)) {
                Ok(_) => {
                    merged.insert(name.to_string(), value.clone());
                }
                Err(e) => warn!("ignoring stored value for '{}': {}", name, e),
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file.
    ///
    /// A missing file yields defaults. A file that is not a JSON object is a
    /// serialization error. Unknown keys are ignored and invalid values are
    /// replaced by their defaults.
    fn load(&mut self) -> Result<BrowserSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        if !path.exists() {
            info!("no settings at {}, using defaults", self.config_path);
            self.settings = BrowserSettings::default();
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("Failed to read config file: {}", e)))?;

        let stored = match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                return Err(SettingsError::Serialization(
                    "Config file is not a JSON object".to_string(),
                ))
            }
            Err(e) => {
                return Err(SettingsError::Serialization(format!(
                    "Failed to parse config file: {}",
                    e
                )))
            }
        };

        self.settings = Self::validate_stored(stored);
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::Serialization(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Returns the wire value of one setting.
    fn get_value(&self, key: &str) -> Result<Value, SettingsError> {
        let key = SettingKey::parse(key)
            .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;
        let map = self.to_object()?;
        Ok(map.get(key.as_str()).cloned().unwrap_or(Value::Null))
    }

    /// Updates one setting by its wire name and saves to disk.
    ///
    /// The value is validated by deserializing the updated object back into
    /// `BrowserSettings`; on failure nothing changes.
    fn set_value(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let key = SettingKey::parse(key)
            .ok_or_else(|| SettingsError::InvalidKey(key.to_string()))?;

        let mut map = self.to_object()?;
        map.insert(key.as_str().to_string(), value);

        let updated: BrowserSettings = serde_json::from_value(Value::Object(map)).map_err(|e| {
            SettingsError::InvalidValue(format!("Invalid value for key '{}': {}", key.as_str(), e))
        })?;

        self.settings = updated;
        self.save()?;
        info!("setting '{}' updated", key.as_str());
        Ok(())
    }

    fn get_all(&self) -> Result<Value, SettingsError> {
        self.to_object().map(Value::Object)
    }

    /// Resets all settings to factory defaults and saves to disk.
    fn reset(&mut self) -> Result<(), SettingsError> {
        self.settings = BrowserSettings::default();
        self.save()
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
