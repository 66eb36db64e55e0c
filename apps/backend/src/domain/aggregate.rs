//! Totals, par differentials and means over plain slices.
//!
//! Callers load rows and pass stroke/par values in; nothing here touches
//! storage. Means return `None` for empty input instead of dividing by zero.

/// Sum of strokes.
pub fn total_score(strokes: &[i32]) -> i32 {
    strokes.iter().sum()
}

/// Sum of par over a course's holes.
pub fn course_par(pars: &[i32]) -> i32 {
    pars.iter().sum()
}

/// `total_score - course_par`; positive means over par.
pub fn total_vs_par(strokes: &[i32], pars: &[i32]) -> i32 {
    total_score(strokes) - course_par(pars)
}

/// Stroke count for `hole_number` from `(hole_number, strokes)` pairs.
pub fn hole_score(scores: &[(i32, i32)], hole_number: i32) -> Option<i32> {
    scores
        .iter()
        .find(|(hole, _)| *hole == hole_number)
        .map(|(_, strokes)| *strokes)
}

/// Arithmetic mean; `None` when `values` is empty.
pub fn mean(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| i64::from(*v)).sum();
    Some(sum as f64 / values.len() as f64)
}
