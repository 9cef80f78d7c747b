// Configuration module for fleet-advisor
// This module handles loading and parsing configuration from ~/.config/fleet-advisor/config.toml

pub mod ai_types;
mod types;

pub use types::{AdvisorConfig, Config};

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AdvisorError;

/// Environment variable that supplies (and implies enabling) the API key
pub const API_KEY_ENV: &str = "API_KEY";

/// Result of loading configuration
#[derive(Debug)]
pub struct ConfigResult {
    pub config: Config,
    pub warning: Option<String>,
}

/// Loads configuration and applies environment overrides
///
/// An explicit path must exist. The default path is optional: a missing file
/// yields defaults silently.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigResult, AdvisorError> {
    let mut result = match explicit {
        Some(path) if !path.exists() => {
            return Err(AdvisorError::ConfigNotFound(path.to_path_buf()));
        }
        Some(path) => load_from_path(path),
        None => load_from_path(&get_config_path()),
    };

    apply_env_overrides(&mut result.config, |name| std::env::var(name).ok());
    Ok(result)
}

/// Loads configuration from `path`
/// Returns default configuration if the file doesn't exist or on parse errors
pub fn load_from_path(config_path: &Path) -> ConfigResult {
    log::debug!("Loading config from {:?}", config_path);

    if !config_path.exists() {
        log::debug!("Config file does not exist, using defaults");
        return ConfigResult {
            config: Config::default(),
            warning: None,
        };
    }

    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            log::error!("Failed to read config file {:?}: {}", config_path, e);
            return ConfigResult {
                config: Config::default(),
                warning: Some(format!("Failed to read config: {}", e)),
            };
        }
    };

    match toml::from_str::<Config>(&contents) {
        Ok(config) => {
            log::debug!(
                "Config parsed successfully (ai enabled: {})",
                config.ai.enabled
            );
            ConfigResult {
                config,
                warning: None,
            }
        }
        Err(e) => {
            log::error!("Failed to parse config file {:?}: {}", config_path, e);
            ConfigResult {
                config: Config::default(),
                warning: Some(format!("Invalid config: {}", e)),
            }
        }
    }
}

/// Apply `API_KEY` from the environment
///
/// A non-blank key replaces the configured one and turns AI on.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.ai.gemini.api_key = Some(key);
        config.ai.enabled = true;
    }
}

/// Returns the path to the configuration file
///
/// Always uses ~/.config/fleet-advisor/config.toml on all platforms for consistency.
fn get_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("fleet-advisor")
        .join("config.toml")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
