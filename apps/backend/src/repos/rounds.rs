//! Round ledger repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use super::page_index;
use crate::adapters::rounds_sea as rounds_adapter;
use crate::domain::page::Page;
use crate::errors::domain::DomainError;

/// Round domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub id: i64,
    pub user_id: i64,
    pub course_id: i64,
    pub played_at: time::OffsetDateTime,
    /// Empty when the weather lookup failed
    pub weather_code: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Option<Round>, DomainError> {
    let round = rounds_adapter::find_by_id(conn, round_id).await?;
    Ok(round.map(Round::from))
}

pub async fn create_round(
    txn: &DatabaseTransaction,
    user_id: i64,
    course_id: i64,
    weather_code: &str,
) -> Result<Round, DomainError> {
    let round = rounds_adapter::create_round(
        txn,
        rounds_adapter::RoundCreate::new(user_id, course_id, weather_code),
    )
    .await?;
    Ok(Round::from(round))
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    page: u64,
    per_page: u64,
) -> Result<Page<Round>, DomainError> {
    let (items, total) =
        rounds_adapter::list_for_user_page(conn, user_id, page_index(page), per_page).await?;
    Ok(Page::new(
        items.into_iter().map(Round::from).collect(),
        page,
        per_page,
        total,
    ))
}

pub async fn list_for_user_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    course_id: i64,
    page: u64,
    per_page: u64,
) -> Result<Page<Round>, DomainError> {
    let (items, total) = rounds_adapter::list_for_user_course_page(
        conn,
        user_id,
        course_id,
        page_index(page),
        per_page,
    )
    .await?;
    Ok(Page::new(
        items.into_iter().map(Round::from).collect(),
        page,
        per_page,
        total,
    ))
}

pub async fn find_all_for_user_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    course_id: i64,
) -> Result<Vec<Round>, DomainError> {
    let rounds = rounds_adapter::find_all_for_user_course(conn, user_id, course_id).await?;
    Ok(rounds.into_iter().map(Round::from).collect())
}

pub async fn count_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<u64, DomainError> {
    Ok(rounds_adapter::count_for_user(conn, user_id).await?)
}

pub async fn delete_round(txn: &DatabaseTransaction, round_id: i64) -> Result<u64, DomainError> {
    Ok(rounds_adapter::delete_by_id(txn, round_id).await?)
}

impl From<crate::entities::rounds::Model> for Round {
    fn from(model: crate::entities::rounds::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            course_id: model.course_id,
            played_at: model.played_at,
            weather_code: model.weather_code,
        }
    }
}
