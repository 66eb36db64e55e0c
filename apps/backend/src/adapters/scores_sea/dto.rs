//! DTOs for scores_sea adapter.

/// One (round, hole) score row to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWrite {
    pub round_id: i64,
    pub hole_number: i16,
    pub strokes: i16,
    pub out_of_bounds: bool,
}

impl ScoreWrite {
    pub fn new(round_id: i64, hole_number: i16, strokes: i16) -> Self {
        Self {
            round_id,
            hole_number,
            strokes,
            out_of_bounds: false,
        }
    }

    pub fn with_out_of_bounds(mut self, out_of_bounds: bool) -> Self {
        self.out_of_bounds = out_of_bounds;
        self
    }
}
