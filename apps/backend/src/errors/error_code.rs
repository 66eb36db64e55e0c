//! Error codes for the Birdie backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Birdie backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Username/password pair rejected
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Token subject no longer exists in the database
    ForbiddenUserNotFound,
    /// Requesting user does not own the round
    NotRoundOwner,

    // Request Validation
    /// Invalid round id in the path
    InvalidRoundId,
    /// Hole number outside the course's range
    InvalidHoleNumber,
    /// General validation error
    ValidationError,
    /// Malformed request
    BadRequest,

    // Resource Not Found
    RoundNotFound,
    CourseNotFound,
    HoleNotFound,
    ScoreNotFound,
    UserNotFound,
    /// Aggregate requested over zero rounds
    NoRoundsPlayed,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    UniqueUsername,
    UniqueEmail,
    UniqueCourseName,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
    /// Stored data violates an invariant (e.g. partially seeded round)
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::NotRoundOwner => "NOT_ROUND_OWNER",

            Self::InvalidRoundId => "INVALID_ROUND_ID",
            Self::InvalidHoleNumber => "INVALID_HOLE_NUMBER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::RoundNotFound => "ROUND_NOT_FOUND",
            Self::CourseNotFound => "COURSE_NOT_FOUND",
            Self::HoleNotFound => "HOLE_NOT_FOUND",
            Self::ScoreNotFound => "SCORE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NoRoundsPlayed => "NO_ROUNDS_PLAYED",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueUsername => "UNIQUE_USERNAME",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::UniqueCourseName => "UNIQUE_COURSE_NAME",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
