//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result, bail};
use moviedb_api::omdb::CategoryFilter;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Default term of the startup search.
const DEFAULT_TERM: &str = "movies";

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb API access settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Browser defaults.
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// OMDb API access configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// API key. `OMDB_API_KEY` takes precedence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Browser defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrowseConfig {
    /// Term searched on startup.
    #[serde(default = "default_term")]
    pub default_term: String,
    /// Category filter on startup.
    #[serde(default)]
    pub default_filter: CategoryFilter,
    /// Whether a new search jumps back to page 1.
    #[serde(default = "default_true")]
    pub reset_page_on_search: bool,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            default_term: default_term(),
            default_filter: CategoryFilter::default(),
            reset_page_on_search: true,
        }
    }
}

fn default_term() -> String {
    String::from(DEFAULT_TERM)
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the API key from `OMDB_API_KEY`, then `api.api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source provides a non-empty key.
    pub fn resolve_api_key(&self) -> Result<String> {
        self.resolve_api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Resolves the API key with an explicit environment value.
    fn resolve_api_key_with(&self, env_key: Option<String>) -> Result<String> {
        let key = env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api.api_key.clone().filter(|k| !k.trim().is_empty()));
        match key {
            Some(key) => Ok(key),
            None => bail!("OMDb API key is required (set {API_KEY_ENV} or api.api_key)"),
        }
    }

    /// Returns a copy with the API key masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.api.api_key.is_some() {
            config.api.api_key = Some(String::from("[REDACTED]"));
        }
        config
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.api.api_key.is_none());
        assert_eq!(config.browse.default_term, "movies");
        assert_eq!(config.browse.default_filter, CategoryFilter::Unconstrained);
        assert!(config.browse.reset_page_on_search);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = AppConfig {
            api: ApiConfig {
                base_url: Some(String::from("http://localhost:8080/")),
                api_key: Some(String::from("abc123")),
                timeout_secs: Some(5),
            },
            browse: BrowseConfig {
                default_term: String::from("batman"),
                default_filter: CategoryFilter::Movie,
                reset_page_on_search: false,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\ndefault_filter = \"series\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.browse.default_filter, CategoryFilter::Series);
        assert_eq!(config.browse.default_term, "movies");
        assert!(config.browse.reset_page_on_search);
        assert_eq!(config.api, ApiConfig::default());
    }

    #[test]
    fn test_load_empty_file_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_accepts_cli_spelling_of_filter() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\ndefault_filter = \"movies\"\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.browse.default_filter, CategoryFilter::Movie);
    }

    #[test]
    fn test_load_rejects_unknown_filter() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[browse]\ndefault_filter = \"episode\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_env_key_wins_over_config() {
        // Arrange
        let mut config = AppConfig::default();
        config.api.api_key = Some(String::from("from-config"));

        // Act
        let key = config
            .resolve_api_key_with(Some(String::from("from-env")))
            .unwrap();

        // Assert
        assert_eq!(key, "from-env");
    }

    #[test]
    fn test_config_key_used_without_env() {
        // Arrange
        let mut config = AppConfig::default();
        config.api.api_key = Some(String::from("from-config"));

        // Act
        let key = config.resolve_api_key_with(Some(String::new())).unwrap();

        // Assert
        assert_eq!(key, "from-config");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        // Arrange
        let config = AppConfig::default();

        // Act
        let err = config.resolve_api_key_with(None).unwrap_err();

        // Assert
        assert!(err.to_string().contains("OMDb API key is required"));
    }

    #[test]
    fn test_redacted_masks_key() {
        // Arrange
        let mut config = AppConfig::default();
        config.api.api_key = Some(String::from("secret"));

        // Act
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();

        // Assert
        assert!(!shown.contains("secret"));
        assert!(shown.contains("[REDACTED]"));
    }
}
