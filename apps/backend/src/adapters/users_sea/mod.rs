//! SeaORM adapter for user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::{UserCreate, UserProfileUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn create_user(
    txn: &DatabaseTransaction,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user.insert(txn).await
}

pub async fn update_profile(
    txn: &DatabaseTransaction,
    dto: UserProfileUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = find_by_id(txn, dto.id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users".to_string()))?;

    let mut user: users::ActiveModel = user.into();
    user.username = Set(dto.username);
    user.email = Set(dto.email);
    user.updated_at = Set(time::OffsetDateTime::now_utc());
    user.update(txn).await
}
