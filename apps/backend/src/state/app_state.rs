use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::weather::{DisabledWeather, WeatherLookup};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection (absent only in state built without `with_db`)
    pub db: Option<DatabaseConnection>,
    /// JWT signing settings
    pub security: SecurityConfig,
    /// Weather lookup used by StartRound
    pub weather: Arc<dyn WeatherLookup>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        weather: Arc<dyn WeatherLookup>,
    ) -> Self {
        Self {
            db: Some(db),
            security,
            weather,
        }
    }

    /// State with no database; handlers needing one fail with `DB_UNAVAILABLE`.
    pub fn without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            weather: Arc::new(DisabledWeather),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
