//! Course catalog service.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::info;

use crate::domain::aggregate;
use crate::domain::page::Page;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::courses::{self, Course, Hole};

pub const COURSES_PAGE_SIZE: u64 = 5;
pub const MAX_HOLE_COUNT: i32 = 36;
pub const DEFAULT_PAR: i32 = 3;
pub const MIN_PAR: i32 = 1;
pub const MAX_PAR: i32 = 10;
const MAX_NAME_LEN: usize = 100;

/// A course with its ordered holes.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDetail {
    pub course: Course,
    pub holes: Vec<Hole>,
    pub par: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseListing {
    pub name: String,
    pub hole_count: i32,
    pub location: String,
}

pub struct CourseService;

impl CourseService {
    pub fn new() -> Self {
        Self
    }

    /// Create a course and its holes 1..=N at par 3 with no length.
    pub async fn create(
        &self,
        txn: &DatabaseTransaction,
        name: &str,
        hole_count: i32,
        location: &str,
    ) -> Result<Course, DomainError> {
        let name = name.trim();
        let location = location.trim();

        if name.is_empty() {
            return Err(DomainError::validation("Course name must not be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "Course name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        if location.is_empty() {
            return Err(DomainError::validation("Location must not be empty"));
        }
        if !(1..=MAX_HOLE_COUNT).contains(&hole_count) {
            return Err(DomainError::validation(format!(
                "Hole count must be between 1 and {MAX_HOLE_COUNT}, got {hole_count}"
            )));
        }

        let course = courses::create_course(txn, name, hole_count, location, DEFAULT_PAR).await?;
        info!(course_id = course.id, hole_count, "Course created");
        Ok(course)
    }

    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: u64,
    ) -> Result<Page<CourseListing>, DomainError> {
        let listed = courses::list_page(conn, page, COURSES_PAGE_SIZE).await?;
        Ok(listed.map(|c| CourseListing {
            name: c.name,
            hole_count: c.hole_count,
            location: c.location,
        }))
    }

    pub async fn get_by_name<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Course, DomainError> {
        courses::find_by_name(conn, name).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Course, format!("Course '{name}' not found"))
        })
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<CourseDetail, DomainError> {
        let course = self.get_by_name(conn, name).await?;
        let holes = courses::find_holes(conn, course.id).await?;
        let par = aggregate::course_par(&holes.iter().map(|h| h.par).collect::<Vec<_>>());
        Ok(CourseDetail { course, holes, par })
    }

    /// Change a hole's par and length.
    pub async fn edit_hole(
        &self,
        txn: &DatabaseTransaction,
        course_name: &str,
        hole_number: i32,
        par: i32,
        length: Option<i32>,
    ) -> Result<Hole, DomainError> {
        if !(MIN_PAR..=MAX_PAR).contains(&par) {
            return Err(DomainError::validation(format!(
                "Par must be between {MIN_PAR} and {MAX_PAR}, got {par}"
            )));
        }
        if let Some(len) = length {
            if len < 0 {
                return Err(DomainError::validation(format!(
                    "Length must not be negative, got {len}"
                )));
            }
        }

        let course = self.get_by_name(txn, course_name).await?;
        if courses::find_hole(txn, course.id, hole_number).await?.is_none() {
            return Err(DomainError::not_found(
                NotFoundKind::Hole,
                format!("Hole {hole_number} of course '{course_name}' not found"),
            ));
        }

        let hole = courses::update_hole(txn, course.id, hole_number, par, length).await?;
        info!(course_id = course.id, hole_number, par, "Hole updated");
        Ok(hole)
    }
}

impl Default for CourseService {
    fn default() -> Self {
        Self::new()
    }
}
