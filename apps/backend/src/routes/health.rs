//! `GET /health`: liveness plus database, migration and weather status.
//!
//! Always answers 200; a missing or failing database turns `status` into
//! `"degraded"` instead of failing the probe.

use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::warn;

use crate::db::require_db;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    /// Latest applied migration, `"no_migrations"` or `"unknown"`
    migrations: String,
    weather: &'static str,
    time: String,
}

struct DbProbe {
    error: Option<String>,
    migrations: String,
}

async fn probe_db(db: &DatabaseConnection) -> DbProbe {
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1 AS health_check");
    if let Err(e) = db.query_one(ping).await {
        warn!(error = %e, "Health check query failed");
        return DbProbe {
            error: Some(format!("DB query failed: {e}")),
            migrations: "unknown".to_string(),
        };
    }

    let migrations = match get_latest_migration_version(db).await {
        Ok(Some(version)) => version,
        Ok(None) => "no_migrations".to_string(),
        Err(_) => "unknown".to_string(),
    };
    DbProbe {
        error: None,
        migrations,
    }
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let probe = match require_db(&app_state) {
        Ok(db) => probe_db(db).await,
        Err(e) => DbProbe {
            error: Some(format!("DB unavailable: {e}")),
            migrations: "unknown".to_string(),
        },
    };

    let healthy = probe.error.is_none();
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: if healthy { "ok" } else { "degraded" },
        app_version: env!("CARGO_PKG_VERSION"),
        db: if healthy { "ok" } else { "error" },
        db_error: probe.error,
        migrations: probe.migrations,
        weather: if app_state.weather.is_enabled() {
            "enabled"
        } else {
            "disabled"
        },
        time,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
