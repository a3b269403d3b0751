//! Application configuration
//!
//! Configuration loaded from `.sharetail.toml`, with the share root
//! overridable through the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable that overrides `share_root`
pub const ROOT_ENV_VAR: &str = "SHARETAIL_ROOT";

/// Application configuration loaded from .sharetail.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory whose sub-directories are the browsable shares
    #[serde(default = "default_share_root")]
    pub share_root: String,

    /// Seconds between tail polls
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Seconds a cached listing or length stays fresh
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Lines kept in the file view; older lines are dropped while tailing
    #[serde(default = "default_max_view_lines")]
    pub max_view_lines: usize,

    /// Keep the view scrolled to the newest line while tailing
    #[serde(default = "default_follow")]
    pub follow: bool,
}

fn default_share_root() -> String {
    ".".to_string()
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_cache_ttl_secs() -> u64 {
    30
}

fn default_max_view_lines() -> usize {
    10_000
}

fn default_follow() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            share_root: default_share_root(),
            poll_interval_secs: default_poll_interval_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            max_view_lines: default_max_view_lines(),
            follow: default_follow(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    ///
    /// `SHARETAIL_ROOT` wins over the file's `share_root`.
    pub fn load() -> Self {
        Self::from_content(crate::load_config_file().as_deref())
            .with_root_override(env::var(ROOT_ENV_VAR).ok())
    }

    fn from_content(content: Option<&str>) -> Self {
        if let Some(content) = content {
            match toml::from_str(content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    fn with_root_override(mut self, root: Option<String>) -> Self {
        if let Some(root) = root.filter(|r| !r.is_empty()) {
            log::info!("Share root overridden by {}: {}", ROOT_ENV_VAR, root);
            self.share_root = root;
        }
        self
    }

    pub fn share_root(&self) -> PathBuf {
        PathBuf::from(&self.share_root)
    }

    /// Poll interval, never shorter than one second
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.share_root, ".");
        assert_eq!(config.poll_interval(), Duration::from_secs(2));
        assert_eq!(config.cache_ttl_secs, 30);
        assert_eq!(config.max_view_lines, 10_000);
        assert!(config.follow);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            share_root = "/mnt/shares"
            follow = false
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.share_root(), PathBuf::from("/mnt/shares"));
        assert!(!config.follow);
        // Other fields should use defaults
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.max_view_lines, 10_000);
    }

    #[test]
    fn test_invalid_file_falls_back_to_defaults() {
        let config = AppConfig::from_content(Some("poll_interval_secs = \"soon\""));
        assert_eq!(config, AppConfig::default());
        assert_eq!(AppConfig::from_content(None), AppConfig::default());
    }

    #[test]
    fn test_root_override() {
        let config = AppConfig::default().with_root_override(Some("/srv/logs".into()));
        assert_eq!(config.share_root, "/srv/logs");

        let config = AppConfig::default().with_root_override(Some(String::new()));
        assert_eq!(config.share_root, ".");
    }

    #[test]
    fn test_poll_interval_has_a_floor() {
        let config: AppConfig = toml::from_str("poll_interval_secs = 0").unwrap();
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }
}
