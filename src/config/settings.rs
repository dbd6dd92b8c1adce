//! Client configuration (config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the API base URL
pub const API_BASE_ENV: &str = "QUILL_API_BASE";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the CMS API, including the version prefix
    pub api_base: String,
    /// Page size for content listings; the client shows one fixed page
    pub page_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8000/api/v1".to_string(),
            page_size: 100,
        }
    }
}

impl Settings {
    /// Load settings from the default config path, applying the
    /// environment override for the API base URL.
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&Self::default_path()?)?;
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            let base = base.trim();
            if !base.is_empty() {
                settings.api_base = base.to_string();
            }
        }
        Ok(settings)
    }

    /// Load settings from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path)?;
            Ok(serde_yaml::from_str(&raw)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Default location: `<config dir>/quill-cms/config.yml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("could not determine the user config directory"))?;
        Ok(dir.join("quill-cms").join("config.yml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("config.yml")).unwrap();
        assert_eq!(settings.page_size, 100);
        assert!(settings.api_base.ends_with("/api/v1"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "api_base: https://cms.example.com/api/v1\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.api_base, "https://cms.example.com/api/v1");
        assert_eq!(settings.page_size, 100);
    }

    #[test]
    fn test_full_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "api_base: http://localhost:9000/api/v1\npage_size: 25\n").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.page_size, 25);
    }
}
