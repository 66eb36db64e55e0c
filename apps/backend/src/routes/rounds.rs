use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::RoundProgress;
use crate::error::AppError;
use crate::extractors::{CurrentUser, HoleNumber, RoundId, ValidatedJson};
use crate::services::courses::CourseService;
use crate::services::scoring::{CurrentHole, ScoringService};
use crate::services::stats::format_played_on;
use crate::state::app_state::AppState;
use crate::weather;

#[derive(Debug, Deserialize)]
pub struct StartRoundRequest {
    pub course_name: String,
}

#[derive(Debug, Deserialize)]
pub struct RecordScoreRequest {
    pub strokes: i32,
    #[serde(default)]
    pub out_of_bounds: bool,
}

#[derive(Debug, Serialize)]
pub struct StartedRoundResponse {
    pub round_id: i64,
    pub course_name: String,
    pub played_on: String,
    pub weather_code: String,
    pub weather_icon_url: Option<String>,
    pub hole_count: i32,
    pub progress: RoundProgress,
}

#[derive(Debug, Serialize)]
pub struct RecordedScoreResponse {
    pub round_id: i64,
    pub hole_number: i32,
    pub strokes: i32,
    pub out_of_bounds: bool,
    pub next_hole_number: i32,
    pub progress: RoundProgress,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CurrentHoleResponse {
    InProgress {
        hole_number: i32,
        hole_count: i32,
        par: i32,
        length: Option<i32>,
        /// Stored strokes, `None` when nothing was ever recorded for this hole
        strokes: Option<i32>,
        out_of_bounds: bool,
    },
    Complete {
        round_id: i64,
    },
}

/// POST /api/rounds
async fn start_round(
    current_user: CurrentUser,
    body: ValidatedJson<StartRoundRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let db = require_db(&app_state)?;

    let course = CourseService::new()
        .get_by_name(db, body.course_name.trim())
        .await?;

    // Upstream call happens before the transaction opens.
    let weather_code = ScoringService::new()
        .weather_for(app_state.weather.as_ref(), &course)
        .await;

    let course_id = course.id;
    let code = weather_code.clone();
    let started = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(ScoringService::new()
                .start_round(txn, user_id, course_id, &code)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(StartedRoundResponse {
        round_id: started.round.id,
        course_name: course.name,
        played_on: format_played_on(started.round.played_at),
        weather_icon_url: weather::icon_url(&weather_code),
        weather_code,
        hole_count: started.hole_count,
        progress: started.progress,
    }))
}

/// GET /api/rounds/{round_id}
async fn round_view(
    _current_user: CurrentUser,
    round_id: RoundId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let summary = ScoringService::new().round_view(db, round_id.0).await?;
    Ok(HttpResponse::Ok().json(summary))
}

/// DELETE /api/rounds/{round_id}
async fn delete_round(
    current_user: CurrentUser,
    round_id: RoundId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let RoundId(id) = round_id;

    with_txn(&app_state, move |txn| {
        Box::pin(async move { Ok(ScoringService::new().delete_round(txn, user_id, id).await?) })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/rounds/{round_id}/holes/{hole}
async fn current_hole(
    current_user: CurrentUser,
    round_id: RoundId,
    hole: HoleNumber,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let current = ScoringService::new()
        .get_current_hole(db, current_user.id, round_id.0, hole.0)
        .await?;

    let body = match current {
        CurrentHole::Hole {
            hole,
            hole_count,
            score,
        } => CurrentHoleResponse::InProgress {
            hole_number: hole.hole_number,
            hole_count,
            par: hole.par,
            length: hole.length,
            strokes: score.map(|s| s.strokes),
            out_of_bounds: score.is_some_and(|s| s.out_of_bounds),
        },
        CurrentHole::Complete => CurrentHoleResponse::Complete {
            round_id: round_id.0,
        },
    };
    Ok(HttpResponse::Ok().json(body))
}

/// PUT /api/rounds/{round_id}/holes/{hole}
async fn record_score(
    current_user: CurrentUser,
    round_id: RoundId,
    hole: HoleNumber,
    body: ValidatedJson<RecordScoreRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = current_user.id;
    let RoundId(id) = round_id;
    let HoleNumber(hole_number) = hole;
    let RecordScoreRequest {
        strokes,
        out_of_bounds,
    } = body.into_inner();

    let recorded = with_txn(&app_state, move |txn| {
        Box::pin(async move {
            Ok(ScoringService::new()
                .record_score(txn, user_id, id, hole_number, strokes, out_of_bounds)
                .await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(RecordedScoreResponse {
        round_id: id,
        hole_number: recorded.score.hole_number,
        strokes: recorded.score.strokes,
        out_of_bounds: recorded.score.out_of_bounds,
        next_hole_number: recorded.next_hole_number,
        progress: recorded.progress,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(start_round))
        .route("/{round_id}", web::get().to(round_view))
        .route("/{round_id}", web::delete().to(delete_round))
        .route("/{round_id}/holes/{hole}", web::get().to(current_hole))
        .route("/{round_id}/holes/{hole}", web::put().to(record_score));
}
