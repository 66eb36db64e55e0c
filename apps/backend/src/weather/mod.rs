//! Weather lookup used when a round starts.
//!
//! The lookup is best effort: `lookup_or_sentinel` turns every failure into
//! the empty code so round creation never depends on the upstream API.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Stored when no weather code could be obtained.
pub const SENTINEL_WEATHER_CODE: &str = "";

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather lookup disabled (no API key)")]
    Disabled,
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather response had no icon code")]
    MissingCode,
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Current weather icon code (e.g. `"10d"`) for a free-text location.
    async fn weather_code(&self, location: &str) -> Result<String, WeatherError>;

    /// Whether lookups can succeed at all; reported by the health check.
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Lookup used when no API key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledWeather;

#[async_trait]
impl WeatherLookup for DisabledWeather {
    async fn weather_code(&self, _location: &str) -> Result<String, WeatherError> {
        Err(WeatherError::Disabled)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Ask `lookup` for a code, falling back to the sentinel on any error.
pub async fn lookup_or_sentinel(lookup: &dyn WeatherLookup, location: &str) -> String {
    match lookup.weather_code(location).await {
        Ok(code) => {
            debug!(location, code = %code, "Weather code resolved");
            code
        }
        Err(WeatherError::Disabled) => {
            debug!(location, "Weather lookup disabled; using sentinel");
            SENTINEL_WEATHER_CODE.to_string()
        }
        Err(e) => {
            warn!(location, error = %e, "Weather lookup failed; using sentinel");
            SENTINEL_WEATHER_CODE.to_string()
        }
    }
}

/// Icon URL for a stored code; `None` for the sentinel.
pub fn icon_url(code: &str) -> Option<String> {
    if code.is_empty() {
        return None;
    }
    Some(format!("http://openweathermap.org/img/wn/{code}.png"))
}
