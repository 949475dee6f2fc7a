use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the recommendation backend
    #[serde(default = "default_backend_base_url")]
    pub backend_base_url: String,

    /// File holding persisted UI preferences
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// Whole-request timeout for backend calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Minimum time the searching state stays visible
    #[serde(default = "default_min_loading_ms")]
    pub min_loading_ms: u64,

    /// Gap between hiding one notification and showing the next
    #[serde(default = "default_notification_gap_ms")]
    pub notification_gap_ms: u64,

    /// How long a notification stays visible
    #[serde(default = "default_notification_duration_ms")]
    pub notification_duration_ms: u64,

    /// Latency floor of the synthesized detail provider
    #[serde(default = "default_detail_latency_ms")]
    pub detail_latency_ms: u64,
}

fn default_backend_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("movie-app-preferences.json")
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_min_loading_ms() -> u64 {
    1500
}

fn default_notification_gap_ms() -> u64 {
    150
}

fn default_notification_duration_ms() -> u64 {
    3000
}

fn default_detail_latency_ms() -> u64 {
    500
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_base_url: default_backend_base_url(),
            preferences_path: default_preferences_path(),
            request_timeout_secs: default_request_timeout_secs(),
            min_loading_ms: default_min_loading_ms(),
            notification_gap_ms: default_notification_gap_ms(),
            notification_duration_ms: default_notification_duration_ms(),
            detail_latency_ms: default_detail_latency_ms(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn detail_latency(&self) -> Duration {
        Duration::from_millis(self.detail_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config: Config = envy::from_iter(vars(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.backend_base_url, "http://localhost:8000");
        assert_eq!(config.min_loading_ms, 1500);
        assert_eq!(config.notification_gap_ms, 150);
    }

    #[test]
    fn test_backend_url_override() {
        let config: Config = envy::from_iter(vars(&[
            ("BACKEND_BASE_URL", "http://recs.internal:9000"),
            ("DETAIL_LATENCY_MS", "25"),
        ]))
        .unwrap();
        assert_eq!(config.backend_base_url, "http://recs.internal:9000");
        assert_eq!(config.detail_latency(), Duration::from_millis(25));
        assert_eq!(config.preferences_path, default_preferences_path());
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let result: Result<Config, _> = envy::from_iter(vars(&[("MIN_LOADING_MS", "soon")]));
        assert!(result.is_err());
    }
}
