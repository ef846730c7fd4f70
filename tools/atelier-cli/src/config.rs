//! CLI configuration.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use atelier_app::AppConfig;
use atelier_commerce::catalog::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use atelier_data::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured API URL.
pub const API_URL_ENV: &str = "ATELIER_API_URL";

/// Default directory for persisted cart and session state.
pub const DEFAULT_STORAGE_DIR: &str = ".atelier";

/// CLI configuration file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Backend base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Where the cart and session are persisted, relative to the config
    /// file's working directory.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Products per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Environment-specific overrides.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub environments: HashMap<String, EnvironmentConfig>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_storage_dir() -> String {
    DEFAULT_STORAGE_DIR.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage_dir: default_storage_dir(),
            page_size: default_page_size(),
            environments: HashMap::new(),
        }
    }
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(&content, path.ends_with(".json"))
            .with_context(|| format!("Failed to parse config file: {}", path))
    }

    fn parse(content: &str, json: bool) -> Result<Self> {
        if json {
            Ok(serde_json::from_str(content)?)
        } else {
            Ok(toml::from_str(content)?)
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Get environment-specific config.
    pub fn for_environment(&self, env: &str) -> Result<CliConfig> {
        let Some(overrides) = self.environments.get(env) else {
            bail!("Unknown environment '{}'", env);
        };

        let mut config = self.clone();
        if let Some(ref url) = overrides.api_url {
            config.api_url = url.clone();
        }
        if let Some(ref dir) = overrides.storage_dir {
            config.storage_dir = dir.clone();
        }
        if let Some(page_size) = overrides.page_size {
            config.page_size = page_size;
        }
        Ok(config)
    }

    /// Apply an API URL override from the environment, if set.
    pub fn with_env_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    /// Check the values the app will be initialized with.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            bail!("api_url must start with http:// or https://: {}", self.api_url);
        }
        if self.storage_dir.trim().is_empty() {
            bail!("storage_dir must not be empty");
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            bail!("page_size must be between 1 and {}", MAX_PAGE_SIZE);
        }
        Ok(())
    }

    /// Storage directory resolved against `cwd`.
    pub fn storage_path(&self, cwd: &std::path::Path) -> PathBuf {
        let dir = PathBuf::from(&self.storage_dir);
        if dir.is_absolute() {
            dir
        } else {
            cwd.join(dir)
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig::new("atelier")
            .with_api_url(self.api_url.clone())
            .with_page_size(self.page_size)
    }
}

/// Environment-specific configuration overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EnvironmentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_dir: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Generate a default atelier.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Atelier client configuration

api_url = "{api_url}"
storage_dir = "{storage_dir}"
page_size = {page_size}

[environments.staging]
# api_url = "https://staging.example.com/api"
storage_dir = ".atelier/staging"

[environments.production]
# api_url = "https://shop.example.com/api"
page_size = 24
"#,
        api_url = DEFAULT_API_URL,
        storage_dir = DEFAULT_STORAGE_DIR,
        page_size = DEFAULT_PAGE_SIZE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = CliConfig::parse(&generate_default_config(), false).unwrap();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.page_size, 12);
        assert!(config.validate().is_ok());
        assert_eq!(config.environments.len(), 2);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = CliConfig::parse(r#"{"page_size": 30}"#, true).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.storage_dir, ".atelier");
        assert_eq!(config.page_size, 30);
    }

    #[test]
    fn test_environment_overrides() {
        let config = CliConfig::parse(&generate_default_config(), false).unwrap();

        let production = config.for_environment("production").unwrap();
        assert_eq!(production.page_size, 24);
        assert_eq!(production.storage_dir, ".atelier");

        let staging = config.for_environment("staging").unwrap();
        assert_eq!(staging.storage_dir, ".atelier/staging");
        assert_eq!(staging.page_size, 12);

        assert!(config.for_environment("qa").is_err());
    }

    #[test]
    fn test_env_override_wins() {
        let config = CliConfig::default()
            .with_env_override(Some("https://shop.example.com/api".into()));
        assert_eq!(config.api_url, "https://shop.example.com/api");

        let config = CliConfig::default().with_env_override(Some("  ".into()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CliConfig::default();
        config.api_url = "localhost:5000".into();
        assert!(config.validate().is_err());

        let mut config = CliConfig::default();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atelier.toml");
        let path = path.to_str().unwrap();

        let mut config = CliConfig::default();
        config.page_size = 48;
        config.save(path).unwrap();

        assert_eq!(CliConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_storage_path_resolution() {
        let cwd = std::path::Path::new("/work/shop");
        let config = CliConfig::default();
        assert_eq!(config.storage_path(cwd), cwd.join(".atelier"));
    }
}
