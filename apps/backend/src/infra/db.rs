use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 3;
const CONNECT_RETRY_INTERVAL_MS: u64 = 500;

fn engine_name(kind: DbKind) -> &'static str {
    match kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

fn connect_options(url: String, kind: DbKind) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    match kind {
        // One connection: an in-memory database lives and dies with it, and a
        // file database serialises writers anyway.
        DbKind::SqliteMemory | DbKind::SqliteFile => {
            opts.max_connections(1).min_connections(1);
        }
        DbKind::Postgres => {
            opts.max_connections(10).min_connections(1);
        }
    }
    opts
}

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(env, kind, owner)?;

    let mut attempt = 1;
    let conn = loop {
        match Database::connect(connect_options(url.clone(), kind)).await {
            Ok(conn) => break conn,
            Err(e) if attempt < CONNECT_ATTEMPTS && kind == DbKind::Postgres => {
                warn!(
                    attempt,
                    max_attempts = CONNECT_ATTEMPTS,
                    error = %e,
                    "Database connection failed, retrying"
                );
                tokio::time::sleep(Duration::from_millis(CONNECT_RETRY_INTERVAL_MS)).await;
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    };

    if kind.is_sqlite() {
        conn.execute_unprepared("PRAGMA foreign_keys = ON;").await?;
    }

    info!(
        engine = engine_name(kind),
        env = ?env,
        owner = ?owner,
        "Database connected"
    );
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(env, kind, owner).await?;

    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Migration failed: {e}")))?;

    Ok(conn)
}
