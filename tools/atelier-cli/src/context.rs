//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use atelier_app::App;
use atelier_cache::FileStore;

use crate::config::{CliConfig, API_URL_ENV};
use crate::output::Output;

/// Config file names searched for, in order, in each directory.
pub const CONFIG_NAMES: [&str; 3] = ["atelier.toml", ".atelier.toml", "atelier.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory of the config file in use, or `cwd` without one.
    pub root: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let config = match env {
            Some(env) => config.for_environment(env)?,
            None => config,
        };
        let config = config.with_env_override(std::env::var(API_URL_ENV).ok());

        let root = path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.clone());

        tracing::debug!(config = ?path, api_url = %config.api_url, "context loaded");

        Ok(Self {
            config,
            output,
            cwd,
            root,
            config_path: path,
        })
    }

    /// Directory holding the persisted cart and session.
    pub fn storage_dir(&self) -> PathBuf {
        self.config.storage_path(&self.root)
    }

    /// Open the app over the file store and the configured backend.
    pub fn open_app(&self) -> Result<App<FileStore>> {
        self.config.validate()?;
        let dir = self.storage_dir();
        let storage = FileStore::open(&dir)
            .with_context(|| format!("Failed to open storage at {}", dir.display()))?;
        App::connect(self.config.to_app_config(), storage)
            .context("Failed to create HTTP client")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(config_path.to_str()?) {
                    Ok(config) => return Some((config, config_path)),
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "skipping config file")
                    }
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("atelier.toml"), "page_size = 20\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(path, dir.path().join("atelier.toml"));
    }

    #[test]
    fn test_find_config_prefers_toml_over_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("atelier.json"), r#"{"page_size": 40}"#).unwrap();
        std::fs::write(dir.path().join(".atelier.toml"), "page_size = 8\n").unwrap();

        let (config, _) = find_config(dir.path()).unwrap();
        assert_eq!(config.page_size, 8);
    }

    #[test]
    fn test_find_config_skips_unparseable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("atelier.toml"), "page_size = [").unwrap();
        std::fs::write(dir.path().join("atelier.json"), r#"{"page_size": 16}"#).unwrap();

        let (config, _) = find_config(dir.path()).unwrap();
        assert_eq!(config.page_size, 16);
    }
}
