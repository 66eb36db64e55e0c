use birdie::errors::domain::{ConflictKind, DomainError};
use birdie::repos::courses;
use sea_orm::TransactionTrait;

use crate::support::{build_test_state, db};

#[tokio::test]
async fn create_course_inserts_default_holes() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);

    let txn = db.begin().await?;
    let course = courses::create_course(&txn, "Links", 9, "Carnoustie", 3).await?;
    txn.commit().await?;

    let holes = courses::find_holes(db, course.id).await?;
    assert_eq!(holes.len(), 9);
    assert_eq!(
        holes.iter().map(|h| h.hole_number).collect::<Vec<_>>(),
        (1..=9).collect::<Vec<_>>()
    );
    assert!(holes.iter().all(|h| h.par == 3 && h.length.is_none()));
    Ok(())
}

#[tokio::test]
async fn course_names_are_unique() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);

    let txn = db.begin().await?;
    courses::create_course(&txn, "Augusta", 18, "Georgia", 3).await?;
    let err = courses::create_course(&txn, "Augusta", 9, "Elsewhere", 3)
        .await
        .unwrap_err();
    txn.rollback().await?;

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::UniqueCourseName, _)
    ));
    Ok(())
}

#[tokio::test]
async fn update_hole_changes_par_and_length() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);

    let txn = db.begin().await?;
    let course = courses::create_course(&txn, "Pinehurst", 4, "NC", 3).await?;
    let hole = courses::update_hole(&txn, course.id, 2, 5, Some(480)).await?;
    txn.commit().await?;

    assert_eq!(hole.par, 5);
    assert_eq!(hole.length, Some(480));
    let reread = courses::find_hole(db, course.id, 2).await?.expect("hole 2");
    assert_eq!(reread, hole);
    Ok(())
}

#[tokio::test]
async fn list_page_orders_by_name_descending() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);

    let txn = db.begin().await?;
    for name in ["Alpha", "Bravo", "Charlie", "Delta", "Echo", "Foxtrot", "Golf"] {
        courses::create_course(&txn, name, 1, "Somewhere", 3).await?;
    }
    txn.commit().await?;

    let first = courses::list_page(db, 1, 5).await?;
    assert_eq!(
        first.items.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Golf", "Foxtrot", "Echo", "Delta", "Charlie"]
    );
    assert_eq!(first.total_items, 7);
    assert!(first.has_next);
    assert!(!first.has_prev);

    let second = courses::list_page(db, 2, 5).await?;
    assert_eq!(
        second.items.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        vec!["Bravo", "Alpha"]
    );
    assert!(!second.has_next);
    assert!(second.has_prev);
    Ok(())
}
