use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use super::PageQuery;
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::{CourseName, CurrentUser, HoleNumber, ValidatedJson};
use crate::repos::courses::{Course, Hole};
use crate::services::courses::CourseService;
use crate::services::stats::{format_played_on, StatsService};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub name: String,
    pub hole_count: i32,
    pub location: String,
}

#[derive(Debug, Deserialize)]
pub struct EditHoleRequest {
    pub par: i32,
    #[serde(default)]
    pub length: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct HoleView {
    pub hole_number: i32,
    pub par: i32,
    pub length: Option<i32>,
}

impl From<Hole> for HoleView {
    fn from(hole: Hole) -> Self {
        Self {
            hole_number: hole.hole_number,
            par: hole.par,
            length: hole.length,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CourseView {
    pub name: String,
    pub hole_count: i32,
    pub location: String,
    pub created_on: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub par: Option<i32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub holes: Vec<HoleView>,
}

impl CourseView {
    fn summary(course: Course) -> Self {
        Self {
            name: course.name,
            hole_count: course.hole_count,
            location: course.location,
            created_on: format_played_on(course.created_at),
            par: None,
            holes: Vec::new(),
        }
    }
}

/// POST /api/courses
async fn create_course(
    _current_user: CurrentUser,
    body: ValidatedJson<CreateCourseRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateCourseRequest {
        name,
        hole_count,
        location,
    } = body.into_inner();

    let course = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(CourseService::new()
                .create(txn, &name, hole_count, &location)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CourseView::summary(course)))
}

/// GET /api/courses?page=
async fn list_courses(
    _current_user: CurrentUser,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let page = CourseService::new().list(db, query.page).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// GET /api/courses/{name}
async fn get_course(
    _current_user: CurrentUser,
    name: CourseName,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let detail = CourseService::new().get(db, &name.0).await?;

    let mut view = CourseView::summary(detail.course);
    view.par = Some(detail.par);
    view.holes = detail.holes.into_iter().map(HoleView::from).collect();
    Ok(HttpResponse::Ok().json(view))
}

/// PUT /api/courses/{name}/holes/{hole}
async fn edit_hole(
    _current_user: CurrentUser,
    name: CourseName,
    hole: HoleNumber,
    body: ValidatedJson<EditHoleRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CourseName(course_name) = name;
    let HoleNumber(hole_number) = hole;
    let EditHoleRequest { par, length } = body.into_inner();

    let updated = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(CourseService::new()
                .edit_hole(txn, &course_name, hole_number, par, length)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(HoleView::from(updated)))
}

/// GET /api/courses/{name}/analysis?page=
async fn analyze_course(
    current_user: CurrentUser,
    name: CourseName,
    query: web::Query<PageQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let course = CourseService::new().get_by_name(db, &name.0).await?;
    let analysis = StatsService::new()
        .analyze_course(db, current_user.id, &course, query.page)
        .await?;
    Ok(HttpResponse::Ok().json(analysis))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_course))
        .route("", web::get().to(list_courses))
        .route("/{name}", web::get().to(get_course))
        .route("/{name}/holes/{hole}", web::put().to(edit_hole))
        .route("/{name}/analysis", web::get().to(analyze_course));
}
