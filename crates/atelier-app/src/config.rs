//! Application configuration.

use atelier_commerce::catalog::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use atelier_data::DEFAULT_API_URL;

/// Settings the app root needs at init.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Application name, used in log lines.
    pub name: String,
    /// Backend base URL.
    pub api_url: String,
    /// Products per listing page.
    pub page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "atelier".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Create a new configuration with the given app name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the backend base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the listing page size, clamped to what the backend accepts.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.page_size, 12);
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::new("shop")
            .with_api_url("https://shop.example.com/api")
            .with_page_size(0);
        assert_eq!(config.name, "shop");
        assert_eq!(config.page_size, 1);
        assert_eq!(AppConfig::default().with_page_size(1000).page_size, 100);
    }
}
