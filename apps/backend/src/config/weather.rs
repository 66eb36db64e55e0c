use std::env;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_OWM_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_OWM_TIMEOUT_MS: u64 = 3_000;

/// OpenWeatherMap settings. No key means lookups are disabled and rounds get the sentinel code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OWM_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_OWM_TIMEOUT_MS),
        }
    }
}

impl WeatherConfig {
    /// Read `OWM_KEY`, `OWM_BASE_URL` and `OWM_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = env::var("OWM_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let base_url = env::var("OWM_BASE_URL").unwrap_or_else(|_| DEFAULT_OWM_BASE_URL.to_string());

        let timeout_ms = match env::var("OWM_TIMEOUT_MS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!("OWM_TIMEOUT_MS must be a whole number of milliseconds, got '{raw}'"))
            })?,
            Err(_) => DEFAULT_OWM_TIMEOUT_MS,
        };

        Ok(Self {
            api_key,
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}
