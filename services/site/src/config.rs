//! services/site/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use najm_core::Theme;
use tracing::Level;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_ADVICE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// `DATA_PATH` value that keeps everything in process memory.
pub const IN_MEMORY_DATA_PATH: &str = ":memory:";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Where the key/value storage lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageLocation {
    File(PathBuf),
    Memory,
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    pub storage: StorageLocation,
    pub gemini_api_key: Option<String>,
    pub advice_api_base: String,
    pub advice_model: String,
    /// `None` disables the limit.
    pub advice_timeout: Option<Duration>,
    /// The colour scheme assumed for visitors with no stored theme.
    pub preferred_scheme: Theme,
    pub allowed_origin: String,
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

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server Settings ---
        let bind_address_str = var("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = var("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let allowed_origin =
            var("ALLOWED_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        // --- Load Storage Settings ---
        let data_path = var("DATA_PATH").unwrap_or_else(|| "./najm_storage.json".to_string());
        let storage = if data_path == IN_MEMORY_DATA_PATH {
            StorageLocation::Memory
        } else {
            StorageLocation::File(PathBuf::from(data_path))
        };

        let preferred_scheme = match var("PREFERS_COLOR_SCHEME") {
            Some(raw) => raw.to_lowercase().parse::<Theme>().map_err(|e| {
                ConfigError::InvalidValue("PREFERS_COLOR_SCHEME".to_string(), e)
            })?,
            None => Theme::Light,
        };

        // --- Load Advice Service Settings ---
        let gemini_api_key = var("GEMINI_API_KEY").filter(|key| !key.trim().is_empty());
        let advice_api_base =
            var("ADVICE_API_BASE").unwrap_or_else(|| DEFAULT_ADVICE_API_BASE.to_string());
        let advice_model =
            var("ADVICE_MODEL").unwrap_or_else(|| "gemini-3-flash-preview".to_string());

        let timeout_str = var("ADVICE_TIMEOUT_SECS").unwrap_or_else(|| "30".to_string());
        let timeout_secs = timeout_str.parse::<u64>().map_err(|e| {
            ConfigError::InvalidValue("ADVICE_TIMEOUT_SECS".to_string(), e.to_string())
        })?;
        let advice_timeout = (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs));

        Ok(Self {
            bind_address,
            log_level,
            storage,
            gemini_api_key,
            advice_api_base,
            advice_model,
            advice_timeout,
            preferred_scheme,
            allowed_origin,
        })
    }
}
