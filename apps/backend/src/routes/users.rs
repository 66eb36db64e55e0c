use actix_web::{web, HttpResponse, Result};
use serde::Deserialize;

use super::auth::AccountResponse;
use super::PageQuery;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CurrentUser, ValidatedJson};
use crate::services::users::UserService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub username: String,
    pub email: String,
}

/// GET /api/users/{username}
async fn get_user(
    _current_user: CurrentUser,
    path: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    let db = require_db(&app_state)?;
    let profile = UserService::new().get_user(db, &username).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// PUT /api/me
async fn edit_profile(
    current_user: CurrentUser,
    body: ValidatedJson<ProfileUpdateRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let ProfileUpdateRequest { username, email } = body.into_inner();

    let user = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            UserService::new()
                .edit_profile(txn, user_id, &username, &email)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        id: user.id,
        username: user.username,
        email: user.email,
    }))
}

/// GET /api/me/rounds?page=
async fn list_my_rounds(
    current_user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let page = UserService::new()
        .list_rounds(db, current_user.id, query.page)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{username}", web::get().to(get_user));
}

pub fn configure_me_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::put().to(edit_profile))
        .route("/rounds", web::get().to(list_my_rounds));
}
