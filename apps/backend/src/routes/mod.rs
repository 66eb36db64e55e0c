use actix_web::web;
use serde::Deserialize;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod auth;
pub mod courses;
pub mod health;
pub mod rounds;
pub mod users;

/// `?page=N`, one-based; absent means the first page.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u64,
}

fn first_page() -> u64 {
    1
}

/// Register every route. Used by `main.rs` and by test apps alike.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query string: {err}")).into()
    }));

    // /health
    cfg.configure(health::configure_routes);

    // /api/auth/**
    cfg.service(web::scope("/api/auth").configure(auth::configure_routes));

    // /api/users/{username}, /api/me/**
    cfg.service(web::scope("/api/users").configure(users::configure_user_routes));
    cfg.service(web::scope("/api/me").configure(users::configure_me_routes));

    // /api/courses/**
    cfg.service(web::scope("/api/courses").configure(courses::configure_routes));

    // /api/rounds/**
    cfg.service(web::scope("/api/rounds").configure(rounds::configure_routes));
}
