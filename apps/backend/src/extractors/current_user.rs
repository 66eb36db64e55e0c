use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::debug;

use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::repos::users;
use crate::state::app_state::AppState;

/// Authenticated caller, resolved from the bearer token and confirmed to still exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// Token part of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Result<String, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::unauthorized_missing_bearer)?;

    let mut parts = auth.splitn(2, ' ');
    match (parts.next(), parts.next()) {
        (Some(scheme), Some(token)) if scheme.eq_ignore_ascii_case("bearer") => {
            let token = token.trim();
            if token.is_empty() {
                Err(AppError::unauthorized_missing_bearer())
            } else {
                Ok(token.to_string())
            }
        }
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let token = bearer_token(&req)?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| AppError::internal("AppState not available"))?;

            let claims = verify_access_token(&token, &app_state.security)?;
            let user_id = claims.user_id()?;

            let db = require_db(app_state)?;
            let user = users::find_by_id(db, user_id)
                .await?
                .ok_or_else(AppError::forbidden_user_not_found)?;

            debug!(user_id = user.id, "Authenticated request");

            Ok(CurrentUser {
                id: user.id,
                username: user.username,
            })
        })
    }
}
