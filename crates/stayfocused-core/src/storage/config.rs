//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Countdown presets (key, label, seconds)
//! - Host poll periods for visible and hidden windows
//! - Fallback images for the side gallery
//! - Sound preferences
//!
//! Configuration is stored at `~/.config/stayfocused/config.toml`.
//! Timer state is never written here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config_dir;
use crate::error::{ConfigError, CoreError, Result, ValidationError};
use crate::gallery::Gallery;
use crate::timer::{
    default_presets, Cadence, Preset, PresetCatalog, DEFAULT_BACKGROUND_MS, DEFAULT_FOREGROUND_MS,
};

/// Poll periods in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default = "default_foreground_ms")]
    pub foreground_ms: u64,
    #[serde(default = "default_background_ms")]
    pub background_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_fallback_images")]
    pub fallback: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoundConfig {
    #[serde(default)]
    pub muted: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/stayfocused/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sound: SoundConfig,
    #[serde(default)]
    pub cadence: CadenceConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    #[serde(default = "default_presets")]
    pub presets: Vec<Preset>,
}

fn default_foreground_ms() -> u64 {
    DEFAULT_FOREGROUND_MS
}
fn default_background_ms() -> u64 {
    DEFAULT_BACKGROUND_MS
}
fn default_fallback_images() -> Vec<String> {
    vec!["/cats/Xivu1.jpg".into(), "/cats/Dio1.jpg".into()]
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            foreground_ms: default_foreground_ms(),
            background_ms: default_background_ms(),
        }
    }
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback_images(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sound: SoundConfig::default(),
            cadence: CadenceConfig::default(),
            gallery: GalleryConfig::default(),
            presets: default_presets(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = match part.parse::<usize>() {
                Ok(idx) if current.is_array() => current.get(idx)?,
                _ => current.get(part)?,
            };
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut current = root;
        for part in key.split('.') {
            current = match part.parse::<usize>() {
                Ok(idx) if current.is_array() => current.get_mut(idx),
                _ => current.get_mut(part),
            }
            .ok_or_else(unknown)?;
        }

        *current = match &*current {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(
                value
                    .parse::<bool>()
                    .map_err(|e| invalid(e.to_string()))?,
            ),
            serde_json::Value::Number(_) => value
                .parse::<u64>()
                .map(|n| serde_json::Value::Number(n.into()))
                .map_err(|_| invalid(format!("cannot parse '{value}' as a whole number")))?,
            serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
            }
            _ => serde_json::Value::String(value.into()),
        };
        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| {
                CoreError::from(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    /// Array entries are addressed by index, e.g. `presets.0.seconds`.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key, in memory. The result must still describe
    /// a valid preset catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the presets would no longer be valid.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.catalog().map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        *self = updated;
        Ok(())
    }

    pub fn catalog(&self) -> std::result::Result<PresetCatalog, ValidationError> {
        PresetCatalog::new(self.presets.clone())
    }

    pub fn cadence(&self) -> Cadence {
        Cadence::new(self.cadence.foreground_ms, self.cadence.background_ms)
    }

    pub fn gallery(&self) -> Gallery {
        Gallery::new(self.gallery.fallback.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("sound.muted").as_deref(), Some("false"));
        assert_eq!(cfg.get("cadence.foreground_ms").as_deref(), Some("250"));
        assert_eq!(cfg.get("presets.1.key").as_deref(), Some("shortBreak"));
        assert!(cfg.get("presets.9.key").is_none());
        assert!(cfg.get("sound.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("sound.muted", "true").unwrap();
        cfg.set("cadence.background_ms", "2000").unwrap();
        cfg.set("presets.0.label", "Deep Work").unwrap();
        cfg.set("presets.0.seconds", "3000").unwrap();
        assert!(cfg.sound.muted);
        assert_eq!(cfg.cadence.background_ms, 2000);
        assert_eq!(cfg.presets[0].label, "Deep Work");
        assert_eq!(cfg.catalog().unwrap().get("focus").map(|p| p.seconds), Some(3000));
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("sound.nonexistent_key", "value"),
            Err(CoreError::Config(ConfigError::UnknownKey(_)))
        ));
        assert!(cfg.set("presets.x.seconds", "1").is_err());
    }

    #[test]
    fn set_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.set("sound.muted", "not_a_bool").is_err());
        assert!(cfg.set("cadence.foreground_ms", "-5").is_err());
    }

    #[test]
    fn set_rejects_invalid_catalog() {
        let mut cfg = Config::default();
        assert!(cfg.set("presets.2.key", "focus").is_err());
        assert!(cfg.set("presets.0.seconds", "0").is_err());
        assert!(cfg.set("presets", "[]").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_replaces_whole_preset_list() {
        let mut cfg = Config::default();
        cfg.set("presets", r#"[{"key":"sprint","label":"Sprint","seconds":600}]"#)
            .unwrap();
        assert_eq!(cfg.catalog().unwrap().first().key, "sprint");
    }

    #[test]
    fn load_from_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "presets = 7").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(CoreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn save_and_reload_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set("gallery.fallback", r#"["a.png","b.png","c.png"]"#).unwrap();
        cfg.save_to(&path).unwrap();
        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.gallery().len(), 3);
        assert_eq!(reloaded, cfg);
    }
}
