use crate::constants::{DEFAULT_WEBHOOK_URL, WEBHOOK_URL_ENV};
use crate::errors::{RelayError, RelayResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub webhook_url: String,
    pub log_level: String,
    pub call_log_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            log_level: "info".to_string(),
            call_log_path: "webhook_calls.log".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> RelayResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| RelayError::config_error(format!("Failed to read config file: {}", e)))?;

        let mut config: Config = serde_json::from_str(&config_str)
            .map_err(|e| RelayError::config_error(format!("Failed to parse config: {}", e)))?;

        // Env var wins over the file
        if let Ok(url) = env::var(WEBHOOK_URL_ENV) {
            config.webhook_url = url;
        }

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();

        if let Ok(url) = env::var(WEBHOOK_URL_ENV) {
            config.webhook_url = url;
        }

        // Save default config
        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            RelayError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| RelayError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| RelayError::config_error(format!("Failed to write config file: {}", e)))?;

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> RelayResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| RelayError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("chatrelay").join("config.json"))
}

fn validate_config(config: &Config) -> RelayResult<()> {
    // Check webhook URL
    if config.webhook_url.is_empty() {
        return Err(RelayError::config_error("Webhook URL is required"));
    }

    if !config.webhook_url.starts_with("http://") && !config.webhook_url.starts_with("https://") {
        return Err(RelayError::config_error(
            "Webhook URL must start with http:// or https://",
        ));
    }

    // Check log level
    if config.log_level.is_empty() {
        return Err(RelayError::config_error("Log level is required"));
    }

    // Check call log path
    if config.call_log_path.is_empty() {
        return Err(RelayError::config_error("Call log path is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

pub fn update_config(updated_config: Config) -> RelayResult<()> {
    validate_config(&updated_config)?;

    let config_path = get_config_path()?;
    let config_str = serde_json::to_string_pretty(&updated_config)
        .map_err(|e| RelayError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(&config_path, config_str)
        .map_err(|e| RelayError::config_error(format!("Failed to write config file: {}", e)))?;

    *CONFIG.write().unwrap() = updated_config;

    Ok(())
}
