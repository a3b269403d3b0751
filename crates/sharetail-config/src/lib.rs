//! Configuration for sharetail
//!
//! This crate provides:
//! - Cache directory path (log files)
//! - Configuration file discovery (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::{AppConfig, ROOT_ENV_VAR};
pub use config_file::{load_config_file, CONFIG_FILE};
pub use paths::cache_dir;
