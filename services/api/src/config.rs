//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use legal_assistant_core::constants::MAX_UPLOAD_BYTES;
use std::net::SocketAddr;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub openai_api_key: Option<String>,
    pub chat_model: String,
    pub analysis_model: String,
    pub sst_model: String,
    pub max_upload_bytes: usize,
    pub cors_origin: String,
    pub seed_data: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:5000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let max_upload_bytes = match lookup("MAX_UPLOAD_BYTES") {
            Some(raw) => raw.parse::<usize>().map_err(|e| {
                ConfigError::InvalidValue("MAX_UPLOAD_BYTES".to_string(), e.to_string())
            })?,
            None => MAX_UPLOAD_BYTES,
        };

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:5173".to_string());

        let seed_data = match lookup("SEED_DATA") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidValue("SEED_DATA".to_string(), raw))?,
            None => true,
        };

        // --- Load API Keys (as optional) ---
        let openai_api_key = lookup("OPENAI_API_KEY").or_else(|| lookup("OPENAI_KEY"));

        // --- Load Adapter-specific Settings ---
        let chat_model = lookup("CHAT_MODEL").unwrap_or_else(|| "gpt-4o".to_string());
        let analysis_model = lookup("ANALYSIS_MODEL").unwrap_or_else(|| "gpt-4o".to_string());
        let sst_model = lookup("SST_MODEL").unwrap_or_else(|| "whisper-1".to_string());

        Ok(Self {
            bind_address,
            log_level,
            openai_api_key,
            chat_model,
            analysis_model,
            sst_model,
            max_upload_bytes,
            cors_origin,
            seed_data,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_address.port(), 5000);
        assert_eq!(config.chat_model, "gpt-4o");
        assert_eq!(config.sst_model, "whisper-1");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.seed_data);
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn legacy_key_name_is_accepted() {
        let config = load(&[("OPENAI_KEY", "sk-legacy")]).unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-legacy"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("BIND_ADDRESS", "nowhere")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "BIND_ADDRESS"
        ));
        assert!(matches!(
            load(&[("SEED_DATA", "maybe")]),
            Err(ConfigError::InvalidValue(var, _)) if var == "SEED_DATA"
        ));
    }
}
