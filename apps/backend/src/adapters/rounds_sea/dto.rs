//! DTOs for rounds_sea adapter.

/// DTO for creating a new round.
#[derive(Debug, Clone)]
pub struct RoundCreate {
    pub user_id: i64,
    pub course_id: i64,
    pub played_at: time::OffsetDateTime,
    pub weather_code: String,
}

impl RoundCreate {
    pub fn new(user_id: i64, course_id: i64, weather_code: impl Into<String>) -> Self {
        Self {
            user_id,
            course_id,
            played_at: time::OffsetDateTime::now_utc(),
            weather_code: weather_code.into(),
        }
    }

    pub fn played_at(mut self, played_at: time::OffsetDateTime) -> Self {
        self.played_at = played_at;
        self
    }
}
