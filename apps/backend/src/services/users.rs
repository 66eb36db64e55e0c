//! Registration, login and profile services.

use std::sync::LazyLock;
use std::time::SystemTime;

use regex::Regex;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::{debug, info};

use crate::auth::jwt::{mint_access_token, ACCESS_TOKEN_TTL_SECS};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::page::Page;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::rounds;
use crate::repos::users::{self, User};
use crate::services::stats::{RoundLine, StatsService};
use crate::state::security_config::SecurityConfig;

pub const ROUNDS_PAGE_SIZE: u64 = 5;
pub const MIN_PASSWORD_LEN: usize = 8;
const MAX_USERNAME_LEN: usize = 64;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicProfile {
    pub id: i64,
    pub username: String,
    pub round_count: u64,
}

/// Trimmed, validated username and email.
fn validate_identity(username: &str, email: &str) -> Result<(String, String), DomainError> {
    let username = username.trim();
    let email = email.trim();

    if username.is_empty() {
        return Err(DomainError::validation("Username must not be empty"));
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::validation(format!(
            "Username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::validation("Username must not contain spaces"));
    }
    if !EMAIL_SHAPE.is_match(email) {
        return Err(DomainError::validation("Email address is not valid"));
    }
    Ok((username.to_string(), email.to_ascii_lowercase()))
}

pub struct UserService;

impl UserService {
    pub fn new() -> Self {
        Self
    }

    pub async fn register(
        &self,
        txn: &DatabaseTransaction,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, AppError> {
        let (username, email) = validate_identity(username, email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            ))
            .into());
        }

        let hash = hash_password(password)?;
        let user = users::create_user(txn, &username, &email, &hash).await?;

        info!(
            user_id = user.id,
            email = %Redacted(&user.email),
            "User registered"
        );
        Ok(user)
    }

    /// Verify credentials and mint an access token. Failures never say which part was wrong.
    pub async fn login<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        security_config: &SecurityConfig,
        username: &str,
        password: &str,
    ) -> Result<LoginToken, AppError> {
        let username = username.trim();

        let Some(user) = users::find_by_username(conn, username).await? else {
            security::login_failed("unknown_user", username);
            return Err(AppError::invalid_credentials());
        };

        if !verify_password(password, &user.password_hash)? {
            security::login_failed("bad_password", username);
            return Err(AppError::invalid_credentials());
        }

        let token = mint_access_token(user.id, &user.username, SystemTime::now(), security_config)?;
        info!(user_id = user.id, "User logged in");

        Ok(LoginToken {
            access_token: token,
            token_type: "Bearer",
            expires_in: ACCESS_TOKEN_TTL_SECS,
            user_id: user.id,
            username: user.username,
        })
    }

    pub async fn get_user<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<PublicProfile, AppError> {
        let user = users::find_by_username(conn, username)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::User, format!("User '{username}' not found"))
            })?;
        let round_count = rounds::count_for_user(conn, user.id).await?;

        debug!(user_id = user.id, round_count, "Profile loaded");
        Ok(PublicProfile {
            id: user.id,
            username: user.username,
            round_count,
        })
    }

    /// Change username and email under the registration rules.
    pub async fn edit_profile(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        username: &str,
        email: &str,
    ) -> Result<User, AppError> {
        let (username, email) = validate_identity(username, email)?;

        if users::find_by_id(txn, user_id).await?.is_none() {
            return Err(
                DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
                    .into(),
            );
        }

        let user = users::update_profile(txn, user_id, &username, &email).await?;
        info!(user_id, "Profile updated");
        Ok(user)
    }

    /// The user's rounds, newest first.
    pub async fn list_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        page: u64,
    ) -> Result<Page<RoundLine>, AppError> {
        let listed = rounds::list_for_user(conn, user_id, page, ROUNDS_PAGE_SIZE).await?;
        Ok(StatsService::new().summarize_rounds(conn, listed).await?)
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}
