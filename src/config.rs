//! Configuration handling for the TUI

use crate::state::FormData;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Countries offered by the country select
    pub countries: Option<Vec<String>>,
    /// Base directory for relative picture paths
    pub picture_dir: Option<PathBuf>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "signup", "signup-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, falling back to defaults when absent
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Record the store starts from
    pub fn initial_form_data(&self) -> FormData {
        match &self.countries {
            Some(countries) if !countries.is_empty() => FormData::with_countries(countries.clone()),
            _ => FormData::default(),
        }
    }

    /// Resolve a typed picture path against `picture_dir`
    pub fn resolve_picture_path(&self, typed: &str) -> PathBuf {
        let typed = Path::new(typed.trim());
        match &self.picture_dir {
            Some(dir) if typed.is_relative() => dir.join(typed),
            _ => typed.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.countries.is_none());
        assert!(config.picture_dir.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            countries: Some(vec!["Chile".to_string(), "Peru".to_string()]),
            picture_dir: Some(PathBuf::from("/tmp/pictures")),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.countries,
            Some(vec!["Chile".to_string(), "Peru".to_string()])
        );
        assert_eq!(parsed.picture_dir, Some(PathBuf::from("/tmp/pictures")));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.countries.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"countries": ["Chile"], "unknown_field": "value"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.countries, Some(vec!["Chile".to_string()]));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = TuiConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.countries.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"countries": ["Chile"]}}"#).unwrap();
        let config = TuiConfig::load_from(file.path()).unwrap();
        assert_eq!(config.countries, Some(vec!["Chile".to_string()]));
    }

    #[test]
    fn test_load_from_invalid_json_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(TuiConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_initial_form_data_uses_country_override() {
        let config = TuiConfig {
            countries: Some(vec!["Chile".to_string()]),
            ..Default::default()
        };
        assert_eq!(config.initial_form_data().country, vec!["Chile"]);
    }

    #[test]
    fn test_empty_country_override_falls_back() {
        let config = TuiConfig {
            countries: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(config.initial_form_data(), FormData::default());
    }

    #[test]
    fn test_resolve_picture_path() {
        let config = TuiConfig {
            picture_dir: Some(PathBuf::from("/pics")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_picture_path("me.png"),
            PathBuf::from("/pics/me.png")
        );
        assert_eq!(
            config.resolve_picture_path("/abs/me.png"),
            PathBuf::from("/abs/me.png")
        );
        assert_eq!(
            TuiConfig::default().resolve_picture_path(" me.png "),
            PathBuf::from("me.png")
        );
    }
}
