use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::services::users::UserService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// POST /api/auth/register
async fn register(
    body: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterRequest {
        username,
        email,
        password,
    } = body.into_inner();

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            UserService::new()
                .register(txn, &username, &email, &password)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(AccountResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

/// POST /api/auth/login
async fn login(
    body: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let token = UserService::new()
        .login(db, &app_state.security, &body.username, &body.password)
        .await?;

    Ok(HttpResponse::Ok().json(token))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
