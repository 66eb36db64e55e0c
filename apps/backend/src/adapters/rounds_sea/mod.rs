//! SeaORM adapter for the round ledger.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::rounds;

pub mod dto;

pub use dto::RoundCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find_by_id(round_id).one(conn).await
}

pub async fn create_round(
    txn: &DatabaseTransaction,
    dto: RoundCreate,
) -> Result<rounds::Model, sea_orm::DbErr> {
    let round = rounds::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        course_id: Set(dto.course_id),
        played_at: Set(dto.played_at),
        weather_code: Set(dto.weather_code),
    };

    round.insert(txn).await
}

/// A user's rounds, newest first.
pub async fn list_for_user_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    page_index: u64,
    per_page: u64,
) -> Result<(Vec<rounds::Model>, u64), sea_orm::DbErr> {
    let paginator = rounds::Entity::find()
        .filter(rounds::Column::UserId.eq(user_id))
        .order_by_desc(rounds::Column::Id)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

/// A user's rounds on one course, newest first.
pub async fn list_for_user_course_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    course_id: i64,
    page_index: u64,
    per_page: u64,
) -> Result<(Vec<rounds::Model>, u64), sea_orm::DbErr> {
    let paginator = rounds::Entity::find()
        .filter(rounds::Column::UserId.eq(user_id))
        .filter(rounds::Column::CourseId.eq(course_id))
        .order_by_desc(rounds::Column::Id)
        .paginate(conn, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(page_index).await?;
    Ok((items, total))
}

/// Every round a user played on one course, oldest first.
pub async fn find_all_for_user_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    course_id: i64,
) -> Result<Vec<rounds::Model>, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::UserId.eq(user_id))
        .filter(rounds::Column::CourseId.eq(course_id))
        .order_by_asc(rounds::Column::Id)
        .all(conn)
        .await
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    rounds::Entity::find()
        .filter(rounds::Column::UserId.eq(user_id))
        .count(conn)
        .await
}

/// Delete one round row. Returns the number of rows removed.
pub async fn delete_by_id(
    txn: &DatabaseTransaction,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = rounds::Entity::delete_by_id(round_id).exec(txn).await?;
    Ok(res.rows_affected)
}
