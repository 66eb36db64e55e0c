//! SeaORM adapter for the score store.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::round_scores;

pub mod dto;

pub use dto::ScoreWrite;

fn active(dto: ScoreWrite) -> round_scores::ActiveModel {
    round_scores::ActiveModel {
        id: NotSet,
        round_id: Set(dto.round_id),
        hole_number: Set(dto.hole_number),
        strokes: Set(dto.strokes),
        out_of_bounds: Set(dto.out_of_bounds),
    }
}

/// Multi-row insert used for seeding. Empty input is a no-op.
pub async fn insert_many(
    txn: &DatabaseTransaction,
    rows: Vec<ScoreWrite>,
) -> Result<(), sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(());
    }
    round_scores::Entity::insert_many(rows.into_iter().map(active))
        .exec_without_returning(txn)
        .await?;
    Ok(())
}

/// Insert or overwrite the row keyed on (round_id, hole_number).
pub async fn upsert(
    txn: &DatabaseTransaction,
    dto: ScoreWrite,
) -> Result<round_scores::Model, sea_orm::DbErr> {
    round_scores::Entity::insert(active(dto))
        .on_conflict(
            OnConflict::columns([
                round_scores::Column::RoundId,
                round_scores::Column::HoleNumber,
            ])
            .update_columns([
                round_scores::Column::Strokes,
                round_scores::Column::OutOfBounds,
            ])
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    find_one(txn, dto.round_id, dto.hole_number)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("round_scores".to_string()))
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    hole_number: i16,
) -> Result<Option<round_scores::Model>, sea_orm::DbErr> {
    round_scores::Entity::find()
        .filter(round_scores::Column::RoundId.eq(round_id))
        .filter(round_scores::Column::HoleNumber.eq(hole_number))
        .one(conn)
        .await
}

/// Scores of one round ordered by hole number.
pub async fn find_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<round_scores::Model>, sea_orm::DbErr> {
    round_scores::Entity::find()
        .filter(round_scores::Column::RoundId.eq(round_id))
        .order_by_asc(round_scores::Column::HoleNumber)
        .all(conn)
        .await
}

/// Scores of several rounds, ordered by round then hole.
pub async fn find_for_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<round_scores::Model>, sea_orm::DbErr> {
    if round_ids.is_empty() {
        return Ok(Vec::new());
    }
    round_scores::Entity::find()
        .filter(round_scores::Column::RoundId.is_in(round_ids.iter().copied()))
        .order_by_asc(round_scores::Column::RoundId)
        .order_by_asc(round_scores::Column::HoleNumber)
        .all(conn)
        .await
}

pub async fn count_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    round_scores::Entity::find()
        .filter(round_scores::Column::RoundId.eq(round_id))
        .count(conn)
        .await
}

/// Delete every score of a round. Returns the number of rows removed.
pub async fn delete_for_round(
    txn: &DatabaseTransaction,
    round_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = round_scores::Entity::delete_many()
        .filter(round_scores::Column::RoundId.eq(round_id))
        .exec(txn)
        .await?;
    Ok(res.rows_affected)
}
