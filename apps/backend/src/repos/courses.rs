//! Course catalog repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;

use super::{page_index, to_small};
use crate::adapters::courses_sea as courses_adapter;
use crate::domain::page::Page;
use crate::errors::domain::DomainError;

/// Course domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub hole_count: i32,
    pub location: String,
    pub created_at: time::OffsetDateTime,
}

/// Hole domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hole {
    pub course_id: i64,
    pub hole_number: i32,
    pub par: i32,
    pub length: Option<i32>,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Option<Course>, DomainError> {
    let course = courses_adapter::find_by_id(conn, course_id).await?;
    Ok(course.map(Course::from))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Course>, DomainError> {
    let course = courses_adapter::find_by_name(conn, name).await?;
    Ok(course.map(Course::from))
}

pub async fn list_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: u64,
    per_page: u64,
) -> Result<Page<Course>, DomainError> {
    let (items, total) = courses_adapter::list_page(conn, page_index(page), per_page).await?;
    Ok(Page::new(
        items.into_iter().map(Course::from).collect(),
        page,
        per_page,
        total,
    ))
}

/// Create a course and its holes `1..=hole_count`, each with `default_par`.
pub async fn create_course(
    txn: &DatabaseTransaction,
    name: &str,
    hole_count: i32,
    location: &str,
    default_par: i32,
) -> Result<Course, DomainError> {
    let hole_count = to_small(hole_count, "hole count")?;
    let par = to_small(default_par, "par")?;

    let course = courses_adapter::create_course(
        txn,
        courses_adapter::CourseCreate::new(name, hole_count, location),
    )
    .await?;
    courses_adapter::insert_default_holes(txn, course.id, hole_count, par).await?;

    Ok(Course::from(course))
}

pub async fn find_holes<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Vec<Hole>, DomainError> {
    let holes = courses_adapter::find_holes(conn, course_id).await?;
    Ok(holes.into_iter().map(Hole::from).collect())
}

pub async fn find_hole<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
    hole_number: i32,
) -> Result<Option<Hole>, DomainError> {
    let hole =
        courses_adapter::find_hole(conn, course_id, to_small(hole_number, "hole number")?).await?;
    Ok(hole.map(Hole::from))
}

pub async fn update_hole(
    txn: &DatabaseTransaction,
    course_id: i64,
    hole_number: i32,
    par: i32,
    length: Option<i32>,
) -> Result<Hole, DomainError> {
    let hole = courses_adapter::update_hole(
        txn,
        courses_adapter::HoleUpdate {
            course_id,
            hole_number: to_small(hole_number, "hole number")?,
            par: to_small(par, "par")?,
            length,
        },
    )
    .await?;
    Ok(Hole::from(hole))
}

impl From<crate::entities::courses::Model> for Course {
    fn from(model: crate::entities::courses::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            hole_count: i32::from(model.hole_count),
            location: model.location,
            created_at: model.created_at,
        }
    }
}

impl From<crate::entities::course_holes::Model> for Hole {
    fn from(model: crate::entities::course_holes::Model) -> Self {
        Self {
            course_id: model.course_id,
            hole_number: i32::from(model.hole_number),
            par: i32::from(model.par),
            length: model.length,
        }
    }
}
