//! Configuration loader for the `weather-finder` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The upstream access credential is the only
//! required value; without it the service refuses to start, so no request is
//! ever issued with an empty key.
use std::env;

use anyhow::{anyhow, Result};

/// Default weatherapi.com base URL (version 1 of the API).
pub const DEFAULT_API_URL: &str = "https://api.weatherapi.com/v1";

/// Parse an optional integer variable with a default value.
macro_rules! parse_env_u16 {
    ($lookup:expr, $var_name:expr, $default:expr) => {
        $lookup($var_name)
            .map(|v| v.parse::<u16>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required, non-blank string variable.
macro_rules! require_env {
    ($lookup:expr, $var_name:expr) => {
        $lookup($var_name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Access credential for the weather provider.
    pub api_key: String,

    /// Weather provider base URL, without a trailing slash.
    pub api_url: String,

    /// TCP port the HTTP server listens on.
    pub port: u16,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `WEATHER_API_KEY` – weather provider access credential
///
/// Optional:
/// - `WEATHER_API_URL` – provider base URL (default: weatherapi.com v1)
/// - `PORT` – listen port (default: 8080)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    load_with(|name| env::var(name).ok())
}

/// Load configuration through an arbitrary variable lookup.
///
/// `load_from_env` delegates here; tests pass a map-backed closure instead of
/// mutating the process environment.
pub fn load_with<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    // ---
    let api_key = require_env!(lookup, "WEATHER_API_KEY");
    let api_url = lookup("WEATHER_API_URL")
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let port = parse_env_u16!(lookup, "PORT", 8080);

    Ok(Config {
        api_key,
        api_url,
        port,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// The access credential is masked down to its last four characters.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  WEATHER_API_KEY : {}", mask_secret(&self.api_key));
        tracing::info!("  WEATHER_API_URL : {}", self.api_url);
        tracing::info!("  PORT            : {}", self.port);
    }
}

fn mask_secret(secret: &str) -> String {
    // ---
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}
