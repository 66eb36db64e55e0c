//! Score store repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use super::courses::Hole;
use super::to_small;
use crate::adapters::scores_sea as scores_adapter;
use crate::errors::domain::DomainError;

/// Score domain model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub round_id: i64,
    pub hole_number: i32,
    pub strokes: i32,
    pub out_of_bounds: bool,
}

/// Seed one default score per hole: strokes = par, in bounds.
pub async fn seed_defaults(
    txn: &DatabaseTransaction,
    round_id: i64,
    holes: &[Hole],
) -> Result<(), DomainError> {
    let rows = holes
        .iter()
        .map(|hole| {
            Ok(scores_adapter::ScoreWrite::new(
                round_id,
                to_small(hole.hole_number, "hole number")?,
                to_small(hole.par, "par")?,
            ))
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    scores_adapter::insert_many(txn, rows).await?;
    Ok(())
}

pub async fn upsert(
    txn: &DatabaseTransaction,
    round_id: i64,
    hole_number: i32,
    strokes: i32,
    out_of_bounds: bool,
) -> Result<Score, DomainError> {
    let dto = scores_adapter::ScoreWrite::new(
        round_id,
        to_small(hole_number, "hole number")?,
        to_small(strokes, "strokes")?,
    )
    .with_out_of_bounds(out_of_bounds);

    let row = scores_adapter::upsert(txn, dto).await?;
    Ok(Score::from(row))
}

pub async fn find_one<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
    hole_number: i32,
) -> Result<Option<Score>, DomainError> {
    let row = scores_adapter::find_one(conn, round_id, to_small(hole_number, "hole number")?)
        .await?;
    Ok(row.map(Score::from))
}

pub async fn find_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Vec<Score>, DomainError> {
    let rows = scores_adapter::find_for_round(conn, round_id).await?;
    Ok(rows.into_iter().map(Score::from).collect())
}

pub async fn find_for_rounds<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_ids: &[i64],
) -> Result<Vec<Score>, DomainError> {
    let rows = scores_adapter::find_for_rounds(conn, round_ids).await?;
    Ok(rows.into_iter().map(Score::from).collect())
}

pub async fn count_for_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(scores_adapter::count_for_round(conn, round_id).await?)
}

pub async fn delete_for_round(
    txn: &DatabaseTransaction,
    round_id: i64,
) -> Result<u64, DomainError> {
    Ok(scores_adapter::delete_for_round(txn, round_id).await?)
}

impl From<crate::entities::round_scores::Model> for Score {
    fn from(model: crate::entities::round_scores::Model) -> Self {
        Self {
            round_id: model.round_id,
            hole_number: i32::from(model.hole_number),
            strokes: i32::from(model.strokes),
            out_of_bounds: model.out_of_bounds,
        }
    }
}
