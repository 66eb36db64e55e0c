//! Aggregation service: loads rows and delegates arithmetic to `domain::aggregate`.

use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::debug;

use crate::domain::aggregate;
use crate::domain::page::Page;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::courses::{self, Course, Hole};
use crate::repos::rounds::{self, Round};
use crate::repos::scores::{self, Score};

/// Rounds per page on a course analysis.
pub const ANALYSIS_PAGE_SIZE: u64 = 3;

/// One line of a round listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundLine {
    pub round_id: i64,
    pub course_name: String,
    pub played_on: String,
    pub total: i32,
    pub vs_par: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoleMean {
    pub hole_number: i32,
    pub par: i32,
    /// `None` when the user has no rounds on the course
    pub mean: Option<f64>,
}

/// A user's history on one course.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourseAnalysis {
    pub course_name: String,
    pub course_par: i32,
    pub rounds: Page<RoundLine>,
    pub mean_round_score: Option<f64>,
    pub hole_means: Vec<HoleMean>,
}

/// `dd/mm/YYYY`
pub fn format_played_on(played_at: OffsetDateTime) -> String {
    played_at
        .format(format_description!("[day]/[month]/[year]"))
        .unwrap_or_default()
}

fn strokes_of(scores: &[Score]) -> Vec<i32> {
    scores.iter().map(|s| s.strokes).collect()
}

fn pars_of(holes: &[Hole]) -> Vec<i32> {
    holes.iter().map(|h| h.par).collect()
}

pub struct StatsService;

impl StatsService {
    pub fn new() -> Self {
        Self
    }

    async fn round_or_not_found<C: ConnectionTrait + Send + Sync>(
        conn: &C,
        round_id: i64,
    ) -> Result<Round, DomainError> {
        rounds::find_by_id(conn, round_id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Round, format!("Round {round_id} not found"))
        })
    }

    /// Sum of strokes over the round's scores.
    pub async fn total_score<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<i32, DomainError> {
        Self::round_or_not_found(conn, round_id).await?;
        let scores = scores::find_for_round(conn, round_id).await?;
        Ok(aggregate::total_score(&strokes_of(&scores)))
    }

    /// Sum of par over the course's holes.
    pub async fn course_par<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        course_id: i64,
    ) -> Result<i32, DomainError> {
        if courses::find_by_id(conn, course_id).await?.is_none() {
            return Err(DomainError::not_found(
                NotFoundKind::Course,
                format!("Course {course_id} not found"),
            ));
        }
        let holes = courses::find_holes(conn, course_id).await?;
        Ok(aggregate::course_par(&pars_of(&holes)))
    }

    pub async fn total_vs_par<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
    ) -> Result<i32, DomainError> {
        let round = Self::round_or_not_found(conn, round_id).await?;
        let scores = scores::find_for_round(conn, round_id).await?;
        let holes = courses::find_holes(conn, round.course_id).await?;
        Ok(aggregate::total_vs_par(
            &strokes_of(&scores),
            &pars_of(&holes),
        ))
    }

    /// Strokes recorded on one hole; `NotFound` when the row is absent.
    pub async fn hole_score<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        round_id: i64,
        hole_number: i32,
    ) -> Result<i32, DomainError> {
        Self::round_or_not_found(conn, round_id).await?;
        scores::find_one(conn, round_id, hole_number)
            .await?
            .map(|s| s.strokes)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Score,
                    format!("No score for hole {hole_number} of round {round_id}"),
                )
            })
    }

    /// Mean strokes on one hole across every round the user played on the course.
    pub async fn mean_hole_score<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        course_id: i64,
        hole_number: i32,
    ) -> Result<f64, DomainError> {
        let played = rounds::find_all_for_user_course(conn, user_id, course_id).await?;
        if played.is_empty() {
            return Err(no_rounds_played(user_id, course_id));
        }

        let ids: Vec<i64> = played.iter().map(|r| r.id).collect();
        let all = scores::find_for_rounds(conn, &ids).await?;

        let mut values = Vec::with_capacity(played.len());
        for round in &played {
            let pairs: Vec<(i32, i32)> = all
                .iter()
                .filter(|s| s.round_id == round.id)
                .map(|s| (s.hole_number, s.strokes))
                .collect();
            let strokes = aggregate::hole_score(&pairs, hole_number).ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Score,
                    format!("No score for hole {hole_number} of round {}", round.id),
                )
            })?;
            values.push(strokes);
        }

        aggregate::mean(&values).ok_or_else(|| no_rounds_played(user_id, course_id))
    }

    /// Mean round total across every round the user played on the course.
    pub async fn mean_round_score<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        course_id: i64,
    ) -> Result<f64, DomainError> {
        let played = rounds::find_all_for_user_course(conn, user_id, course_id).await?;
        if played.is_empty() {
            return Err(no_rounds_played(user_id, course_id));
        }

        let ids: Vec<i64> = played.iter().map(|r| r.id).collect();
        let totals = totals_by_round(&scores::find_for_rounds(conn, &ids).await?);
        let values: Vec<i32> = ids
            .iter()
            .map(|id| totals.get(id).copied().unwrap_or(0))
            .collect();

        aggregate::mean(&values).ok_or_else(|| no_rounds_played(user_id, course_id))
    }

    /// Total and vs-par for each round, resolving course names and pars once per course.
    pub async fn summarize_rounds<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: Page<Round>,
    ) -> Result<Page<RoundLine>, DomainError> {
        let ids: Vec<i64> = page.items.iter().map(|r| r.id).collect();
        let totals = totals_by_round(&scores::find_for_rounds(conn, &ids).await?);

        let mut course_info: HashMap<i64, (String, i32)> = HashMap::new();
        for round in &page.items {
            if course_info.contains_key(&round.course_id) {
                continue;
            }
            let name = courses::find_by_id(conn, round.course_id)
                .await?
                .map(|c| c.name)
                .unwrap_or_default();
            let par = aggregate::course_par(&pars_of(
                &courses::find_holes(conn, round.course_id).await?,
            ));
            course_info.insert(round.course_id, (name, par));
        }

        Ok(page.map(|round| {
            let total = totals.get(&round.id).copied().unwrap_or(0);
            let (course_name, par) = course_info
                .get(&round.course_id)
                .cloned()
                .unwrap_or_default();
            RoundLine {
                round_id: round.id,
                course_name,
                played_on: format_played_on(round.played_at),
                total,
                vs_par: total - par,
            }
        }))
    }

    /// Paged rounds plus mean round score and per-hole means for a user on a course.
    pub async fn analyze_course<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        user_id: i64,
        course: &Course,
        page: u64,
    ) -> Result<CourseAnalysis, DomainError> {
        let holes = courses::find_holes(conn, course.id).await?;
        let listed =
            rounds::list_for_user_course(conn, user_id, course.id, page, ANALYSIS_PAGE_SIZE)
                .await?;
        let rounds_page = self.summarize_rounds(conn, listed).await?;

        let played = rounds::find_all_for_user_course(conn, user_id, course.id).await?;
        let ids: Vec<i64> = played.iter().map(|r| r.id).collect();
        let all = scores::find_for_rounds(conn, &ids).await?;

        let totals = totals_by_round(&all);
        let round_totals: Vec<i32> = ids
            .iter()
            .map(|id| totals.get(id).copied().unwrap_or(0))
            .collect();

        let hole_means = holes
            .iter()
            .map(|hole| {
                let strokes: Vec<i32> = all
                    .iter()
                    .filter(|s| s.hole_number == hole.hole_number)
                    .map(|s| s.strokes)
                    .collect();
                HoleMean {
                    hole_number: hole.hole_number,
                    par: hole.par,
                    mean: aggregate::mean(&strokes),
                }
            })
            .collect();

        debug!(
            user_id,
            course_id = course.id,
            rounds_played = played.len(),
            "Course analysis computed"
        );

        Ok(CourseAnalysis {
            course_name: course.name.clone(),
            course_par: aggregate::course_par(&pars_of(&holes)),
            rounds: rounds_page,
            mean_round_score: aggregate::mean(&round_totals),
            hole_means,
        })
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new()
    }
}

fn no_rounds_played(user_id: i64, course_id: i64) -> DomainError {
    DomainError::not_found(
        NotFoundKind::RoundsPlayed,
        format!("User {user_id} has no rounds on course {course_id}"),
    )
}

fn totals_by_round(all: &[Score]) -> HashMap<i64, i32> {
    let mut totals: HashMap<i64, i32> = HashMap::new();
    for s in all {
        *totals.entry(s.round_id).or_insert(0) += s.strokes;
    }
    totals
}
