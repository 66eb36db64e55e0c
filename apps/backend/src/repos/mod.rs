//! Repository functions for the domain layer (generic over ConnectionTrait).
//!
//! Reads accept any connection; writes take a `DatabaseTransaction` so the
//! caller owns atomicity. Everything returns `DomainError`.

use crate::errors::domain::DomainError;

pub mod courses;
pub mod rounds;
pub mod scores;
pub mod users;

/// Narrow a domain integer to the SMALLINT storage width.
pub(crate) fn to_small(value: i32, field: &str) -> Result<i16, DomainError> {
    i16::try_from(value)
        .map_err(|_| DomainError::validation(format!("{field} {value} is out of range")))
}

/// Zero-based page index for a one-based page number; page 0 is treated as page 1.
pub(crate) fn page_index(page: u64) -> u64 {
    page.max(1) - 1
}
