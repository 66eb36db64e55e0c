//! Worked examples for the aggregate functions.

use crate::domain::aggregate::{course_par, hole_score, mean, total_score, total_vs_par};

#[test]
fn par_differential_example() {
    let pars = [4, 4, 3, 5];
    let strokes = [5, 4, 3, 7];
    assert_eq!(course_par(&pars), 16);
    assert_eq!(total_score(&strokes), 19);
    assert_eq!(total_vs_par(&strokes, &pars), 3);
}

#[test]
fn under_par_is_negative() {
    assert_eq!(total_vs_par(&[3, 3, 2], &[4, 4, 3]), -3);
}

#[test]
fn mean_of_two_rounds() {
    assert_eq!(mean(&[80, 84]), Some(82.0));
}

#[test]
fn mean_of_nothing_is_none() {
    assert_eq!(mean(&[]), None);
}

#[test]
fn hole_score_lookup() {
    let scores = [(1, 4), (2, 6), (3, 3)];
    assert_eq!(hole_score(&scores, 2), Some(6));
    assert_eq!(hole_score(&scores, 4), None);
}

#[test]
fn empty_round_totals_zero() {
    assert_eq!(total_score(&[]), 0);
    assert_eq!(course_par(&[]), 0);
}
