//! OpenWeatherMap current-weather client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{WeatherError, WeatherLookup};
use crate::config::weather::WeatherConfig;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    icon: Option<String>,
}

#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    /// Build a client whose every request is bounded by `config.timeout`.
    pub fn new(config: &WeatherConfig, api_key: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to create weather HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

/// First icon code in a current-weather payload.
fn extract_icon(body: CurrentWeather) -> Result<String, WeatherError> {
    body.weather
        .into_iter()
        .find_map(|c| c.icon.filter(|icon| !icon.is_empty()))
        .ok_or(WeatherError::MissingCode)
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn weather_code(&self, location: &str) -> Result<String, WeatherError> {
        let url = format!("{}/weather", self.base_url);
        let body = self
            .client
            .get(&url)
            .query(&[("q", location), ("appid", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json::<CurrentWeather>()
            .await?;

        extract_icon(body)
    }
}
