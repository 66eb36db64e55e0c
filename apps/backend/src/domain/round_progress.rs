//! Round progression: `InProgress(1..=N)` until a hole past N is reached.
//!
//! There is no stored state column; progress is derived from the hole the
//! caller is on and the course's hole count.

use serde::Serialize;

use crate::errors::domain::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RoundProgress {
    InProgress { hole_number: i32 },
    Complete,
}

impl RoundProgress {
    /// Progress when positioned at `hole_number`.
    pub fn at_hole(hole_number: i32, hole_count: i32) -> Self {
        if hole_number > hole_count {
            RoundProgress::Complete
        } else {
            RoundProgress::InProgress { hole_number }
        }
    }

    /// Progress after a score for `recorded_hole` was stored.
    pub fn after_recording(recorded_hole: i32, hole_count: i32) -> Self {
        Self::at_hole(recorded_hole + 1, hole_count)
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, RoundProgress::Complete)
    }
}

/// Reject hole numbers outside `1..=hole_count`.
pub fn ensure_hole_in_range(hole_number: i32, hole_count: i32) -> Result<(), DomainError> {
    if hole_number < 1 || hole_number > hole_count {
        return Err(DomainError::validation(format!(
            "Hole number {hole_number} is outside 1..={hole_count}"
        )));
    }
    Ok(())
}
