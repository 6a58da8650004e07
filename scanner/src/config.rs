use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Name of the optional configuration file at the root of a doc set.
pub const CONFIG_FILE_NAME: &str = "apidoc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocSetConfig {
    /// Report skipped external and bookmark links as warnings.
    pub include_warnings: bool,
    /// File extensions treated as documentation pages.
    pub extensions: Vec<String>,
    /// Glob patterns, relative to the doc set root, of pages to leave out.
    pub exclude: Vec<String>,
}

impl Default for DocSetConfig {
    fn default() -> Self {
        DocSetConfig {
            include_warnings: false,
            extensions: vec!["md".to_string()],
            exclude: Vec::new(),
        }
    }
}

impl DocSetConfig {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: DocSetConfig =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    /// Load `apidoc.toml` from the doc set root, falling back to defaults when absent.
    pub fn load(docset_root: &Path) -> Result<Self, ConfigError> {
        let config = Self::load_from_path(docset_root.join(CONFIG_FILE_NAME))?;
        Ok(config.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = DocSetConfig::load_from_path(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert!(loaded.is_none());
        assert_eq!(DocSetConfig::load(temp_dir.path()).unwrap(), DocSetConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "include-warnings = true\nexclude = [\"drafts/**\"]\n",
        )
        .unwrap();

        let config = DocSetConfig::load(temp_dir.path()).unwrap();
        assert!(config.include_warnings);
        assert_eq!(config.exclude, vec!["drafts/**"]);
        assert_eq!(config.extensions, vec!["md"]);
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "include-warnings = \"yes\"\n").unwrap();

        let err = DocSetConfig::load(temp_dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
