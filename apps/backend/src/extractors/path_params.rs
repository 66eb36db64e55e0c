use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Round id from the `{round_id}` path segment; must be a positive integer.
///
/// Existence and ownership are checked by the scoring service, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundId(pub i64);

impl FromRequest for RoundId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_round_id(req.match_info().get("round_id")).map(RoundId))
    }
}

fn parse_round_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw =
        raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidRoundId, "Missing round_id parameter"))?;

    let id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidRoundId, format!("Invalid round id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidRoundId,
            format!("Round id must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

/// Hole number from the `{hole}` path segment.
///
/// Only the integer shape is checked; range checks against the course need
/// the hole count and happen in the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoleNumber(pub i32);

impl FromRequest for HoleNumber {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_hole(req.match_info().get("hole")).map(HoleNumber))
    }
}

fn parse_hole(raw: Option<&str>) -> Result<i32, AppError> {
    let raw =
        raw.ok_or_else(|| AppError::bad_request(ErrorCode::InvalidHoleNumber, "Missing hole parameter"))?;

    raw.parse::<i32>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidHoleNumber, format!("Invalid hole number: {raw}"))
    })
}

/// Course name from the `{name}` path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseName(pub String);

impl FromRequest for CourseName {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let name = req
            .match_info()
            .get("name")
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(|n| CourseName(n.to_string()))
            .ok_or_else(|| AppError::bad_request(ErrorCode::BadRequest, "Missing course name"));
        ready(name)
    }
}
