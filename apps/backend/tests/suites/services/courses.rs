use birdie::errors::domain::{DomainError, NotFoundKind};
use birdie::services::courses::CourseService;
use sea_orm::TransactionTrait;

use crate::support::{build_test_state, db};

#[tokio::test]
async fn create_validates_inputs() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let service = CourseService::new();

    for (name, holes, location) in [
        ("   ", 18, "Fife"),
        ("Old Course", 0, "Fife"),
        ("Old Course", 37, "Fife"),
        ("Old Course", 18, ""),
    ] {
        let txn = db.begin().await?;
        let err = service.create(&txn, name, holes, location).await.unwrap_err();
        txn.rollback().await?;
        assert!(matches!(err, DomainError::Validation(_)), "{name:?} {holes}");
    }
    Ok(())
}

#[tokio::test]
async fn get_returns_holes_and_par() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let service = CourseService::new();

    let txn = db.begin().await?;
    service.create(&txn, "  Muirfield ", 9, "East Lothian").await?;
    txn.commit().await?;

    let detail = service.get(db, "Muirfield").await?;
    assert_eq!(detail.course.name, "Muirfield");
    assert_eq!(detail.holes.len(), 9);
    assert_eq!(detail.par, 27);

    assert!(matches!(
        service.get(db, "Nowhere").await,
        Err(DomainError::NotFound(NotFoundKind::Course, _))
    ));
    Ok(())
}

#[tokio::test]
async fn edit_hole_rules() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let service = CourseService::new();

    let txn = db.begin().await?;
    service.create(&txn, "Troon", 3, "Ayrshire").await?;
    let hole = service.edit_hole(&txn, "Troon", 2, 4, Some(390)).await?;
    assert_eq!((hole.par, hole.length), (4, Some(390)));

    assert!(matches!(
        service.edit_hole(&txn, "Troon", 2, 0, None).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        service.edit_hole(&txn, "Troon", 2, 4, Some(-1)).await,
        Err(DomainError::Validation(_))
    ));
    assert!(matches!(
        service.edit_hole(&txn, "Troon", 4, 4, None).await,
        Err(DomainError::NotFound(NotFoundKind::Hole, _))
    ));
    txn.commit().await?;

    assert_eq!(service.get(db, "Troon").await?.par, 10);
    Ok(())
}
