//! Settings persistence module.
//!
//! Provider credentials are stored as one JSON record in
//! `.postcraft/settings.json`, overwritten wholesale on every save. Missing
//! fields deserialize to their defaults so a partially-shaped file from an
//! older version still loads; a file that fails to parse at all is reported
//! as an error and the caller falls back to defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Model used when the stored model setting is empty.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Persisted provider settings, saved between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PersistedSettings {
    /// OpenAI API key. May be empty; the backend rejects invalid credentials.
    #[serde(default)]
    pub api_key: String,
    /// OpenAI model name. Empty means [`DEFAULT_MODEL`].
    #[serde(default)]
    pub model: String,
    /// ScrapeGraphAI API key, only needed when scraping is requested.
    #[serde(default)]
    pub scrapegraph_api_key: String,
}

impl PersistedSettings {
    /// Returns the model to send, substituting the default for empty.
    #[must_use]
    pub fn effective_model(&self) -> String {
        if self.model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            self.model.clone()
        }
    }
}

/// Loads settings from the given path.
///
/// A missing file yields defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<PersistedSettings> {
    if !path.exists() {
        return Ok(PersistedSettings::default());
    }

    let content = std::fs::read_to_string(path).context("Failed to read settings file")?;

    serde_json::from_str(&content).context("Failed to parse settings file")
}

/// Saves settings to the given path as pretty-printed JSON, unconditionally
/// overwriting any prior value. The parent directory must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_settings(path: &Path, settings: &PersistedSettings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

    std::fs::write(path, json).context("Failed to write settings file")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fs::PostcraftPaths;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_empty() {
        let settings = PersistedSettings::default();
        assert!(settings.api_key.is_empty());
        assert!(settings.model.is_empty());
        assert!(settings.scrapegraph_api_key.is_empty());
    }

    #[test]
    fn effective_model_defaults_when_empty() {
        let settings = PersistedSettings::default();
        assert_eq!(settings.effective_model(), "gpt-3.5-turbo");

        let settings = PersistedSettings {
            model: "gpt-4".to_string(),
            ..Default::default()
        };
        assert_eq!(settings.effective_model(), "gpt-4");
    }

    #[test]
    fn load_nonexistent_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        let settings = paths.load_settings().unwrap();
        assert_eq!(settings, PersistedSettings::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        let settings = PersistedSettings {
            api_key: "k1".to_string(),
            model: "gpt-4".to_string(),
            scrapegraph_api_key: "sg-key".to_string(),
        };

        paths.save_settings(&settings).unwrap();
        let loaded = paths.load_settings().unwrap();
        assert_eq!(settings, loaded);
    }

    #[test]
    fn save_overwrites_prior_value_wholesale() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        paths
            .save_settings(&PersistedSettings {
                api_key: "old".to_string(),
                model: "gpt-4".to_string(),
                scrapegraph_api_key: "sg".to_string(),
            })
            .unwrap();
        paths
            .save_settings(&PersistedSettings {
                api_key: "new".to_string(),
                ..Default::default()
            })
            .unwrap();

        let loaded = paths.load_settings().unwrap();
        assert_eq!(loaded.api_key, "new");
        assert!(loaded.model.is_empty());
        assert!(loaded.scrapegraph_api_key.is_empty());
    }

    #[test]
    fn save_creates_postcraft_directory() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        assert!(!paths.postcraft_dir().exists());
        paths.save_settings(&PersistedSettings::default()).unwrap();
        assert!(paths.postcraft_dir().exists());
        assert!(paths.settings_file().exists());
    }

    #[test]
    fn partial_json_fills_missing_fields_with_defaults() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        paths.ensure_postcraft_dir().unwrap();
        std::fs::write(paths.settings_file(), r#"{"api_key":"k1"}"#).unwrap();

        let loaded = paths.load_settings().unwrap();
        assert_eq!(loaded.api_key, "k1");
        assert!(loaded.model.is_empty());
        assert!(loaded.scrapegraph_api_key.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let temp = TempDir::new().unwrap();
        let paths = PostcraftPaths::new(temp.path());

        paths.ensure_postcraft_dir().unwrap();
        std::fs::write(paths.settings_file(), "not json at all").unwrap();

        assert!(paths.load_settings().is_err());
    }

    #[test]
    fn json_format_uses_snake_case_keys() {
        let settings = PersistedSettings {
            api_key: "k1".to_string(),
            model: "gpt-4".to_string(),
            scrapegraph_api_key: "sg".to_string(),
        };

        let json = serde_json::to_string_pretty(&settings).unwrap();
        assert!(json.contains("\"api_key\""));
        assert!(json.contains("\"model\""));
        assert!(json.contains("\"scrapegraph_api_key\""));
    }
}
