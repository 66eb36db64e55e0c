//! Round-scoring workflow: start, record, resume, delete, verify, summarize.
//!
//! Reads take any connection; every mutation takes the caller's
//! transaction. The caller's user id is trusted as given.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::aggregate;
use crate::domain::round_progress::{ensure_hole_in_range, RoundProgress};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::security;
use crate::repos::courses::{self, Course, Hole};
use crate::repos::rounds::{self, Round};
use crate::repos::scores::{self, Score};
use crate::services::stats::format_played_on;
use crate::weather::{self, WeatherLookup};

/// Smallest stroke count accepted; there is no upper bound beyond storage width.
pub const MIN_STROKES: i32 = 1;

/// A freshly created round, positioned at hole 1.
#[derive(Debug, Clone, PartialEq)]
pub struct StartedRound {
    pub round: Round,
    pub hole_count: i32,
    pub progress: RoundProgress,
}

/// Result of storing one hole's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedScore {
    pub score: Score,
    pub next_hole_number: i32,
    pub progress: RoundProgress,
}

/// What the caller should show for a requested hole.
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentHole {
    Hole {
        hole: Hole,
        hole_count: i32,
        /// `None` for legacy rounds that were never seeded
        score: Option<Score>,
    },
    /// Past the last hole: go to the round summary.
    Complete,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoleRow {
    pub hole_number: i32,
    pub par: i32,
    pub strokes: i32,
    pub out_of_bounds: bool,
}

/// Rendered round summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundSummary {
    pub round_id: i64,
    pub user_id: i64,
    pub course_name: String,
    pub played_on: String,
    pub weather_code: String,
    pub weather_icon_url: Option<String>,
    pub holes: Vec<HoleRow>,
    pub total: i32,
    pub vs_par: i32,
}

pub struct ScoringService;

impl ScoringService {
    pub fn new() -> Self {
        Self
    }

    /// Weather code for the course location, or the sentinel. Call before opening the transaction.
    pub async fn weather_for(&self, weather: &dyn WeatherLookup, course: &Course) -> String {
        weather::lookup_or_sentinel(weather, &course.location).await
    }

    /// Create a round and seed one default score (strokes = par) per hole.
    pub async fn start_round(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        course_id: i64,
        weather_code: &str,
    ) -> Result<StartedRound, DomainError> {
        let course = load_course(txn, course_id).await?;
        let holes = courses::find_holes(txn, course.id).await?;

        // A round is only created when every hole can be seeded.
        if usize::try_from(course.hole_count).ok() != Some(holes.len()) {
            warn!(
                course_id = course.id,
                hole_count = course.hole_count,
                holes_found = holes.len(),
                "Course hole records do not match its hole count"
            );
            return Err(DomainError::integrity(format!(
                "Course {} has {} of {} hole records",
                course.id,
                holes.len(),
                course.hole_count
            )));
        }

        let round = rounds::create_round(txn, user_id, course.id, weather_code).await?;
        scores::seed_defaults(txn, round.id, &holes).await?;

        info!(
            round_id = round.id,
            user_id,
            course_id = course.id,
            seeded = holes.len(),
            "Round started"
        );

        Ok(StartedRound {
            round,
            hole_count: course.hole_count,
            progress: RoundProgress::at_hole(1, course.hole_count),
        })
    }

    /// Store strokes for one hole and advance.
    pub async fn record_score(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        round_id: i64,
        hole_number: i32,
        strokes: i32,
        out_of_bounds: bool,
    ) -> Result<RecordedScore, DomainError> {
        let round = load_round(txn, round_id).await?;
        ensure_owner(&round, user_id, "record_score")?;

        let course = load_course(txn, round.course_id).await?;
        ensure_hole_in_range(hole_number, course.hole_count)?;
        ensure_strokes_positive(strokes)?;

        if scores::find_one(txn, round_id, hole_number).await?.is_none() {
            warn!(
                round_id,
                hole_number, "No seeded score for hole; inserting (legacy round)"
            );
        }

        let score = scores::upsert(txn, round_id, hole_number, strokes, out_of_bounds).await?;
        let progress = RoundProgress::after_recording(hole_number, course.hole_count);

        info!(
            round_id,
            hole_number,
            strokes,
            out_of_bounds,
            complete = progress.is_complete(),
            "Score recorded"
        );

        Ok(RecordedScore {
            score,
            next_hole_number: hole_number + 1,
            progress,
        })
    }

    /// The hole to show for entry, with the stored score for pre-filling.
    pub async fn get_current_hole<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        round_id: i64,
        hole_number: i32,
    ) -> Result<CurrentHole, DomainError> {
        if hole_number < 1 {
            return Err(DomainError::validation(format!(
                "Hole number must be at least 1, got {hole_number}"
            )));
        }

        let round = load_round(conn, round_id).await?;
        ensure_owner(&round, user_id, "get_current_hole")?;
        let course = load_course(conn, round.course_id).await?;

        if RoundProgress::at_hole(hole_number, course.hole_count).is_complete() {
            return Ok(CurrentHole::Complete);
        }

        let hole = courses::find_hole(conn, course.id, hole_number)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Hole,
                    format!("Hole {hole_number} of course {} not found", course.name),
                )
            })?;
        let score = scores::find_one(conn, round_id, hole_number).await?;

        Ok(CurrentHole::Hole {
            hole,
            hole_count: course.hole_count,
            score,
        })
    }

    /// Delete a round and its scores. Only the owner may do this.
    pub async fn delete_round(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
        round_id: i64,
    ) -> Result<(), DomainError> {
        let round = load_round(txn, round_id).await?;
        ensure_owner(&round, user_id, "delete_round")?;

        let scores_deleted = scores::delete_for_round(txn, round_id).await?;
        rounds::delete_round(txn, round_id).await?;

        info!(round_id, user_id, scores_deleted, "Round deleted");
        Ok(())
    }

    /// Fail with `DataCorruption` when fewer score rows exist than the course has holes.
    pub async fn verify_round_integrity<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<(), DomainError> {
        let round = load_round(conn, round_id).await?;
        let course = load_course(conn, round.course_id).await?;
        check_integrity(conn, &round, &course).await
    }

    /// Course, date, weather, per-hole rows and totals for one round.
    pub async fn round_view<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<RoundSummary, DomainError> {
        let round = load_round(conn, round_id).await?;
        let course = load_course(conn, round.course_id).await?;
        check_integrity(conn, &round, &course).await?;

        let holes = courses::find_holes(conn, course.id).await?;
        let scores = scores::find_for_round(conn, round_id).await?;

        let rows: Vec<HoleRow> = scores
            .iter()
            .map(|s| HoleRow {
                hole_number: s.hole_number,
                par: holes
                    .iter()
                    .find(|h| h.hole_number == s.hole_number)
                    .map(|h| h.par)
                    .unwrap_or_default(),
                strokes: s.strokes,
                out_of_bounds: s.out_of_bounds,
            })
            .collect();

        let strokes: Vec<i32> = scores.iter().map(|s| s.strokes).collect();
        let pars: Vec<i32> = holes.iter().map(|h| h.par).collect();

        Ok(RoundSummary {
            round_id: round.id,
            user_id: round.user_id,
            course_name: course.name,
            played_on: format_played_on(round.played_at),
            weather_icon_url: weather::icon_url(&round.weather_code),
            weather_code: round.weather_code,
            holes: rows,
            total: aggregate::total_score(&strokes),
            vs_par: aggregate::total_vs_par(&strokes, &pars),
        })
    }
}

impl Default for ScoringService {
    fn default() -> Self {
        Self::new()
    }
}

async fn load_round<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round_id: i64,
) -> Result<Round, DomainError> {
    rounds::find_by_id(conn, round_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
    })
}

async fn load_course<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    course_id: i64,
) -> Result<Course, DomainError> {
    courses::find_by_id(conn, course_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Course, format!("Course {course_id} not found"))
    })
}

fn ensure_owner(round: &Round, user_id: i64, action: &str) -> Result<(), DomainError> {
    if round.user_id != user_id {
        security::ownership_denied(user_id, round.id, action);
        return Err(DomainError::unauthorized(format!(
            "Round {} belongs to another user",
            round.id
        )));
    }
    Ok(())
}

fn ensure_strokes_positive(strokes: i32) -> Result<(), DomainError> {
    if strokes < MIN_STROKES {
        return Err(DomainError::validation(format!(
            "Strokes must be at least {MIN_STROKES}, got {strokes}"
        )));
    }
    Ok(())
}

async fn check_integrity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    round: &Round,
    course: &Course,
) -> Result<(), DomainError> {
    let stored = scores::count_for_round(conn, round.id).await?;
    let expected = u64::try_from(course.hole_count).unwrap_or(0);
    if stored < expected {
        warn!(
            round_id = round.id,
            stored,
            expected,
            "Round is missing score rows"
        );
        return Err(DomainError::integrity(format!(
            "Round {} has {stored} of {expected} scores",
            round.id
        )));
    }
    Ok(())
}
