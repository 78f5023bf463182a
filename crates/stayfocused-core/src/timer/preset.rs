use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A named, fixed countdown length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub key: String,
    pub label: String,
    /// Duration in whole seconds.
    pub seconds: u64,
}

impl Preset {
    pub fn new(key: impl Into<String>, label: impl Into<String>, seconds: u64) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            seconds,
        }
    }
}

/// Ordered, validated set of presets.
///
/// Keys are unique, durations positive, and there is always at least one
/// entry, so the first preset can serve as the initial selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
}

impl PresetCatalog {
    pub fn new(presets: Vec<Preset>) -> Result<Self, ValidationError> {
        if presets.is_empty() {
            return Err(ValidationError::EmptyCatalog);
        }
        for (i, preset) in presets.iter().enumerate() {
            if preset.key.trim().is_empty() {
                return Err(ValidationError::BlankKey);
            }
            if preset.seconds == 0 {
                return Err(ValidationError::ZeroDuration {
                    key: preset.key.clone(),
                });
            }
            if presets[..i].iter().any(|p| p.key == preset.key) {
                return Err(ValidationError::DuplicatePreset(preset.key.clone()));
            }
        }
        Ok(Self { presets })
    }

    /// Focus, short break and long break.
    pub fn standard() -> Self {
        Self {
            presets: default_presets(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn first(&self) -> &Preset {
        // Non-empty by construction.
        &self.presets[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new("focus", "Focus (25m)", 25 * 60),
        Preset::new("shortBreak", "Short Break (5m)", 5 * 60),
        Preset::new("longBreak", "Long Break (10m)", 10 * 60),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_durations() {
        let catalog = PresetCatalog::standard();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("focus").map(|p| p.seconds), Some(1500));
        assert_eq!(catalog.get("shortBreak").map(|p| p.seconds), Some(300));
        assert_eq!(catalog.get("longBreak").map(|p| p.seconds), Some(600));
        assert_eq!(catalog.first().key, "focus");
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(PresetCatalog::new(vec![]), Err(ValidationError::EmptyCatalog));
    }

    #[test]
    fn rejects_duplicate_keys() {
        let result = PresetCatalog::new(vec![
            Preset::new("focus", "A", 60),
            Preset::new("focus", "B", 120),
        ]);
        assert_eq!(result, Err(ValidationError::DuplicatePreset("focus".into())));
    }

    #[test]
    fn rejects_zero_duration() {
        let result = PresetCatalog::new(vec![Preset::new("nap", "Nap", 0)]);
        assert!(matches!(result, Err(ValidationError::ZeroDuration { .. })));
    }

    #[test]
    fn rejects_blank_key() {
        let result = PresetCatalog::new(vec![Preset::new("  ", "Blank", 10)]);
        assert_eq!(result, Err(ValidationError::BlankKey));
    }

    #[test]
    fn keys_preserve_order() {
        let keys: Vec<_> = PresetCatalog::standard().keys().map(String::from).collect();
        assert_eq!(keys, ["focus", "shortBreak", "longBreak"]);
    }
}
