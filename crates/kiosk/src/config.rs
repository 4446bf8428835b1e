//! Kiosk configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KIOSK_BACKEND_URL` - Base URL of the kiosk backend
//! - `KIOSK_API_TOKEN` - Bearer token sent with every backend request
//!
//! ## Optional
//! - `KIOSK_POLL_INTERVAL_SECS` - Health poll interval (default: 15)
//! - `KIOSK_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 30)
//! - `KIOSK_DANGER_ACCEPT_INVALID_CERTS` - Accept self-signed backend
//!   certificates (default: false; only for maintenance setups)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default health poll interval, tuned for Pi-class kiosk hardware.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;

/// Default catalog cache lifetime.
pub const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Kiosk client configuration.
#[derive(Debug, Clone)]
pub struct KioskConfig {
    /// Base URL of the kiosk backend.
    pub base_url: Url,
    /// Bearer token for backend requests (validated server-side).
    pub api_token: SecretString,
    /// How often the status poller refreshes machine health.
    pub poll_interval: Duration,
    /// How long a fetched catalog stays valid before a re-fetch.
    pub catalog_cache_ttl: Duration,
    /// Accept self-signed backend certificates.
    pub danger_accept_invalid_certs: bool,
}

impl KioskConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(&get_required_env("KIOSK_BACKEND_URL")?)?;
        let api_token = SecretString::from(get_required_env("KIOSK_API_TOKEN")?);
        let poll_interval = Duration::from_secs(get_secs_or_default(
            "KIOSK_POLL_INTERVAL_SECS",
            DEFAULT_POLL_INTERVAL_SECS,
        )?);
        let catalog_cache_ttl = Duration::from_secs(get_secs_or_default(
            "KIOSK_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CATALOG_CACHE_TTL_SECS,
        )?);
        let danger_accept_invalid_certs = parse_bool_flag(&get_env_or_default(
            "KIOSK_DANGER_ACCEPT_INVALID_CERTS",
            "false",
        ));

        Ok(Self {
            base_url,
            api_token,
            poll_interval,
            catalog_cache_ttl,
            danger_accept_invalid_certs,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get a seconds value from the environment, with a default.
fn get_secs_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Parse and validate the backend base URL.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("KIOSK_BACKEND_URL".to_string(), e.to_string()))
}

/// Interpret common truthy spellings of a boolean flag.
fn parse_bool_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}
