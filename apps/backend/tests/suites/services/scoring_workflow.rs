use birdie::domain::RoundProgress;
use birdie::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use birdie::repos::{rounds, scores};
use birdie::services::scoring::{CurrentHole, ScoringService};
use birdie::entities::course_holes;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionTrait};

use crate::support::factory::{create_course, create_user, record_all, start_round};
use crate::support::{build_test_state, db};

#[tokio::test]
async fn start_round_seeds_one_default_per_hole() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "starter").await;
    let course = create_course(db, "seeding", &[4, 3, 5, 4]).await;

    let txn = db.begin().await?;
    let started = ScoringService::new()
        .start_round(&txn, user.id, course.id, "10d")
        .await?;
    txn.commit().await?;

    assert_eq!(started.progress, RoundProgress::InProgress { hole_number: 1 });
    assert_eq!(started.hole_count, 4);
    assert_eq!(started.round.weather_code, "10d");
    assert_eq!(started.round.user_id, user.id);

    let seeded = scores::find_for_round(db, started.round.id).await?;
    assert_eq!(seeded.len(), 4);
    assert_eq!(
        seeded.iter().map(|s| s.strokes).collect::<Vec<_>>(),
        vec![4, 3, 5, 4]
    );
    assert!(seeded.iter().all(|s| !s.out_of_bounds));
    Ok(())
}

#[tokio::test]
async fn recording_twice_keeps_last_value() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "resumer").await;
    let course = create_course(db, "resume", &[4, 4, 4]).await;
    let round = start_round(db, user.id, course.id, "").await;

    let service = ScoringService::new();
    let txn = db.begin().await?;
    service.record_score(&txn, user.id, round.id, 2, 7, true).await?;
    let second = service.record_score(&txn, user.id, round.id, 2, 5, false).await?;
    txn.commit().await?;

    assert_eq!(second.next_hole_number, 3);
    let rows = scores::find_for_round(db, round.id).await?;
    assert_eq!(rows.len(), 3);
    let hole2 = scores::find_one(db, round.id, 2).await?.expect("hole 2");
    assert_eq!((hole2.strokes, hole2.out_of_bounds), (5, false));
    Ok(())
}

#[tokio::test]
async fn last_hole_completes_the_round() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "finisher").await;
    let course = create_course(db, "finish", &[3, 3, 3]).await;
    let round = start_round(db, user.id, course.id, "").await;

    let txn = db.begin().await?;
    let middle = ScoringService::new()
        .record_score(&txn, user.id, round.id, 2, 3, false)
        .await?;
    let last = ScoringService::new()
        .record_score(&txn, user.id, round.id, 3, 4, false)
        .await?;
    txn.commit().await?;

    assert_eq!(middle.progress, RoundProgress::InProgress { hole_number: 3 });
    assert_eq!(last.next_hole_number, 4);
    assert_eq!(last.progress, RoundProgress::Complete);
    Ok(())
}

#[tokio::test]
async fn out_of_range_hole_is_rejected_without_mutation() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "ranger").await;
    let course = create_course(db, "range", &[4, 4]).await;
    let round = start_round(db, user.id, course.id, "").await;

    for hole in [0, 3, -1] {
        let txn = db.begin().await?;
        let err = ScoringService::new()
            .record_score(&txn, user.id, round.id, hole, 4, false)
            .await
            .unwrap_err();
        txn.rollback().await?;
        assert!(matches!(err, DomainError::Validation(_)), "hole {hole}");
    }

    let txn = db.begin().await?;
    let err = ScoringService::new()
        .record_score(&txn, user.id, round.id, 1, 0, false)
        .await
        .unwrap_err();
    txn.rollback().await?;
    assert!(matches!(err, DomainError::Validation(_)));

    assert_eq!(scores::count_for_round(db, round.id).await?, 2);
    Ok(())
}

#[tokio::test]
async fn unknown_round_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "lost").await;

    let txn = db.begin().await?;
    let err = ScoringService::new()
        .record_score(&txn, user.id, 9999, 1, 4, false)
        .await
        .unwrap_err();
    txn.rollback().await?;

    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Round, _)));
    Ok(())
}

#[tokio::test]
async fn non_owner_cannot_record() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let owner = create_user(db, "owner").await;
    let intruder = create_user(db, "intruder").await;
    let course = create_course(db, "owned", &[4]).await;
    let round = start_round(db, owner.id, course.id, "").await;

    let txn = db.begin().await?;
    let err = ScoringService::new()
        .record_score(&txn, intruder.id, round.id, 1, 9, false)
        .await
        .unwrap_err();
    txn.rollback().await?;

    assert!(matches!(err, DomainError::Unauthorized(_)));
    assert_eq!(scores::find_one(db, round.id, 1).await?.expect("seeded").strokes, 4);
    Ok(())
}

#[tokio::test]
async fn current_hole_prefills_and_completes() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "prefill").await;
    let course = create_course(db, "prefill", &[4, 5]).await;
    let round = start_round(db, user.id, course.id, "").await;
    record_all(db, user.id, round.id, &[6]).await;

    let service = ScoringService::new();

    match service.get_current_hole(db, user.id, round.id, 1).await? {
        CurrentHole::Hole {
            hole,
            hole_count,
            score,
        } => {
            assert_eq!(hole.par, 4);
            assert_eq!(hole_count, 2);
            assert_eq!(score.expect("recorded").strokes, 6);
        }
        CurrentHole::Complete => panic!("hole 1 is in range"),
    }

    match service.get_current_hole(db, user.id, round.id, 2).await? {
        CurrentHole::Hole { score, .. } => assert_eq!(score.expect("seeded").strokes, 5),
        CurrentHole::Complete => panic!("hole 2 is in range"),
    }

    assert_eq!(
        service.get_current_hole(db, user.id, round.id, 3).await?,
        CurrentHole::Complete
    );
    assert!(matches!(
        service.get_current_hole(db, user.id, round.id, 0).await,
        Err(DomainError::Validation(_))
    ));
    Ok(())
}

#[tokio::test]
async fn owner_delete_removes_round_and_scores() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "deleter").await;
    let course = create_course(db, "delete", &[3, 4, 5]).await;
    let round = start_round(db, user.id, course.id, "").await;

    let txn = db.begin().await?;
    ScoringService::new().delete_round(&txn, user.id, round.id).await?;
    txn.commit().await?;

    assert!(rounds::find_by_id(db, round.id).await?.is_none());
    assert_eq!(scores::count_for_round(db, round.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn non_owner_delete_touches_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let owner = create_user(db, "keeper").await;
    let other = create_user(db, "thief").await;
    let course = create_course(db, "keep", &[3, 4, 5]).await;
    let round = start_round(db, owner.id, course.id, "").await;

    let txn = db.begin().await?;
    let err = ScoringService::new()
        .delete_round(&txn, other.id, round.id)
        .await
        .unwrap_err();
    txn.rollback().await?;

    assert!(matches!(err, DomainError::Unauthorized(_)));
    assert!(rounds::find_by_id(db, round.id).await?.is_some());
    assert_eq!(scores::count_for_round(db, round.id).await?, 3);
    Ok(())
}

#[tokio::test]
async fn partially_seeded_round_fails_integrity() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "partial").await;
    let course = create_course(db, "partial", &[4, 4, 4]).await;

    // Round row without the seeding step.
    let txn = db.begin().await?;
    let round = rounds::create_round(&txn, user.id, course.id, "").await?;
    scores::upsert(&txn, round.id, 1, 4, false).await?;
    txn.commit().await?;

    let service = ScoringService::new();
    let err = service.verify_round_integrity(db, round.id).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::DataCorruption, _)
    ));
    assert!(service.round_view(db, round.id).await.is_err());

    let seeded = start_round(db, user.id, course.id, "").await;
    assert!(service.verify_round_integrity(db, seeded.id).await.is_ok());
    Ok(())
}

#[tokio::test]
async fn round_view_renders_totals_and_weather() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "viewer").await;
    let course = create_course(db, "view", &[4, 4, 3, 5]).await;
    let round = start_round(db, user.id, course.id, "04n").await;
    record_all(db, user.id, round.id, &[5, 4, 3, 7]).await;

    let summary = ScoringService::new().round_view(db, round.id).await?;
    assert_eq!(summary.total, 19);
    assert_eq!(summary.vs_par, 3);
    assert_eq!(summary.holes.len(), 4);
    assert_eq!(summary.holes[3].par, 5);
    assert_eq!(summary.holes[3].strokes, 7);
    assert_eq!(
        summary.weather_icon_url.as_deref(),
        Some("http://openweathermap.org/img/wn/04n.png")
    );
    assert_eq!(summary.played_on.len(), "dd/mm/YYYY".len());

    let no_weather = start_round(db, user.id, course.id, "").await;
    let summary = ScoringService::new().round_view(db, no_weather.id).await?;
    assert_eq!(summary.weather_code, "");
    assert!(summary.weather_icon_url.is_none());
    Ok(())
}

#[tokio::test]
async fn start_round_refuses_course_with_missing_hole() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "gap").await;
    let course = create_course(db, "gap", &[4, 4, 4]).await;

    course_holes::Entity::delete_many()
        .filter(course_holes::Column::CourseId.eq(course.id))
        .filter(course_holes::Column::HoleNumber.eq(3))
        .exec(db)
        .await?;

    let txn = db.begin().await?;
    let err = ScoringService::new()
        .start_round(&txn, user.id, course.id, "")
        .await
        .unwrap_err();
    txn.commit().await?;

    assert!(matches!(
        err,
        DomainError::Infra(InfraErrorKind::DataCorruption, _)
    ));
    assert_eq!(rounds::count_for_user(db, user.id).await?, 0);
    Ok(())
}

#[tokio::test]
async fn high_stroke_counts_are_stored() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "blowup").await;
    let course = create_course(db, "blowup", &[4, 4]).await;
    let round = start_round(db, user.id, course.id, "").await;

    let txn = db.begin().await?;
    let recorded = ScoringService::new()
        .record_score(&txn, user.id, round.id, 1, 100, false)
        .await?;
    txn.commit().await?;
    assert_eq!(recorded.score.strokes, 100);
    assert_eq!(scores::find_one(db, round.id, 1).await?.expect("hole 1").strokes, 100);

    // Beyond the SMALLINT column the repo still refuses.
    let txn = db.begin().await?;
    let err = ScoringService::new()
        .record_score(&txn, user.id, round.id, 2, 40_000, false)
        .await
        .unwrap_err();
    txn.rollback().await?;
    assert!(matches!(err, DomainError::Validation(_)));
    Ok(())
}
