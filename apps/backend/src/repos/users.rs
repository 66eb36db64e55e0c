//! User repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::users_sea as users_adapter;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_username(conn, username).await?;
    Ok(user.map(User::from))
}

pub async fn create_user(
    txn: &DatabaseTransaction,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(
        txn,
        users_adapter::UserCreate::new(username, email, password_hash),
    )
    .await?;
    Ok(User::from(user))
}

pub async fn update_profile(
    txn: &DatabaseTransaction,
    user_id: i64,
    username: &str,
    email: &str,
) -> Result<User, DomainError> {
    let user = users_adapter::update_profile(
        txn,
        users_adapter::UserProfileUpdate {
            id: user_id,
            username: username.to_string(),
            email: email.to_string(),
        },
    )
    .await?;
    Ok(User::from(user))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
