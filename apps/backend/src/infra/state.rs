use std::sync::Arc;

use tracing::info;

use crate::config::db::{DbKind, DbOwner, RuntimeEnv};
use crate::config::weather::WeatherConfig;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::weather::openweather::OpenWeatherClient;
use crate::weather::{DisabledWeather, WeatherLookup};

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    security_config: SecurityConfig,
    weather_config: WeatherConfig,
    weather: Option<Arc<dyn WeatherLookup>>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            security_config: SecurityConfig::default(),
            weather_config: WeatherConfig::default(),
            weather: None,
        }
    }

    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = Some(kind);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_weather_config(mut self, weather_config: WeatherConfig) -> Self {
        self.weather_config = weather_config;
        self
    }

    /// Use this lookup instead of one derived from the weather config.
    pub fn with_weather(mut self, weather: Arc<dyn WeatherLookup>) -> Self {
        self.weather = Some(weather);
        self
    }

    fn resolve_weather(
        weather: Option<Arc<dyn WeatherLookup>>,
        config: &WeatherConfig,
    ) -> Result<Arc<dyn WeatherLookup>, AppError> {
        if let Some(weather) = weather {
            return Ok(weather);
        }
        match &config.api_key {
            Some(key) => Ok(Arc::new(OpenWeatherClient::new(config, key.clone())?)),
            None => {
                info!("OWM_KEY not set; weather lookups disabled");
                Ok(Arc::new(DisabledWeather))
            }
        }
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let weather = Self::resolve_weather(self.weather, &self.weather_config)?;

        match self.db_kind {
            Some(kind) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(self.env, kind, DbOwner::App).await?;
                Ok(AppState::new(conn, self.security_config, weather))
            }
            None => {
                let mut state = AppState::without_db(self.security_config);
                state.weather = weather;
                Ok(state)
            }
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
