use std::sync::Arc;

use async_trait::async_trait;
use birdie::config::db::{DbKind, RuntimeEnv};
use birdie::infra::state::build_state;
use birdie::state::app_state::AppState;
use birdie::state::security_config::SecurityConfig;
use birdie::weather::{WeatherError, WeatherLookup};
use birdie::AppError;
use sea_orm::DatabaseConnection;

pub const TEST_JWT_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// Weather lookup with a canned answer. `None` behaves like an upstream without a code.
#[derive(Debug, Clone, Copy)]
pub struct FixedWeather(pub Option<&'static str>);

#[async_trait]
impl WeatherLookup for FixedWeather {
    async fn weather_code(&self, _location: &str) -> Result<String, WeatherError> {
        self.0.map(str::to_string).ok_or(WeatherError::MissingCode)
    }
}

/// Fresh migrated in-memory SQLite state with the given weather stub.
pub async fn build_test_state_with_weather(weather: FixedWeather) -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(DbKind::SqliteMemory)
        .with_security(SecurityConfig::new(TEST_JWT_SECRET))
        .with_weather(Arc::new(weather))
        .build()
        .await
}

/// Fresh state whose weather lookup answers `"10d"`.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_test_state_with_weather(FixedWeather(Some("10d"))).await
}

pub fn db(state: &AppState) -> &DatabaseConnection {
    state.db().expect("test state should have a database")
}
