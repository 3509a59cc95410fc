//! Tracker configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local development.

use std::env;
use std::time::Duration;

/// Default quiet period before a notes edit is saved.
pub const DEFAULT_AUTOSAVE_DEBOUNCE_MS: u64 = 1000;
/// Default delay between credential readiness checks.
pub const DEFAULT_AUTH_POLL_INTERVAL_MS: u64 = 200;
/// Default number of credential readiness checks before giving up.
pub const DEFAULT_AUTH_MAX_ATTEMPTS: u32 = 10;
/// Default length of the recent-days history list.
pub const DEFAULT_HISTORY_LIMIT: usize = 7;

/// Log output format for the host binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Tracker configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the tracker REST API (e.g. `https://example.com/api`)
    pub api_base_url: String,
    /// Bearer token for the env-backed session (absent until signed in)
    pub access_token: Option<String>,
    /// Notes autosave quiet period
    pub autosave_debounce: Duration,
    /// Credential readiness poll interval
    pub auth_poll_interval: Duration,
    /// Credential readiness attempts
    pub auth_max_attempts: u32,
    /// Save a pending notes edit when the day is closed instead of dropping it
    pub flush_on_close: bool,
    /// Days shown in the history list
    pub history_limit: usize,
    pub log_format: LogFormat,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            access_token: None,
            autosave_debounce: Duration::from_millis(DEFAULT_AUTOSAVE_DEBOUNCE_MS),
            auth_poll_interval: Duration::from_millis(DEFAULT_AUTH_POLL_INTERVAL_MS),
            auth_max_attempts: DEFAULT_AUTH_MAX_ATTEMPTS,
            flush_on_close: false,
            history_limit: DEFAULT_HISTORY_LIMIT,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("TRACKER_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("TRACKER_API_BASE_URL"))?;
        if api_base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "TRACKER_API_BASE_URL",
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            access_token: env::var("TRACKER_ACCESS_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            autosave_debounce: Duration::from_millis(parse_or(
                "TRACKER_AUTOSAVE_DEBOUNCE_MS",
                DEFAULT_AUTOSAVE_DEBOUNCE_MS,
            )),
            auth_poll_interval: Duration::from_millis(parse_or(
                "TRACKER_AUTH_POLL_INTERVAL_MS",
                DEFAULT_AUTH_POLL_INTERVAL_MS,
            )),
            auth_max_attempts: parse_or("TRACKER_AUTH_MAX_ATTEMPTS", DEFAULT_AUTH_MAX_ATTEMPTS)
                .max(1),
            flush_on_close: parse_or("TRACKER_FLUSH_ON_CLOSE", false),
            history_limit: parse_or("TRACKER_HISTORY_LIMIT", DEFAULT_HISTORY_LIMIT),
            log_format: match env::var("TRACKER_LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        })
    }
}

/// Parse an optional variable, falling back to the default when unset or malformed.
fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("TRACKER_API_BASE_URL", "https://tracker.example/api/");
        env::set_var("TRACKER_AUTOSAVE_DEBOUNCE_MS", "250");
        env::set_var("TRACKER_AUTH_MAX_ATTEMPTS", "not-a-number");
        env::set_var("TRACKER_FLUSH_ON_CLOSE", "true");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_base_url, "https://tracker.example/api");
        assert_eq!(config.autosave_debounce, Duration::from_millis(250));
        assert_eq!(config.auth_max_attempts, DEFAULT_AUTH_MAX_ATTEMPTS);
        assert!(config.flush_on_close);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }
}
