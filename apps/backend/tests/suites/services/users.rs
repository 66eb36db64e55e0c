use birdie::auth::jwt::verify_access_token;
use birdie::errors::ErrorCode;
use birdie::services::users::UserService;
use sea_orm::TransactionTrait;

use crate::support::factory::{create_course, create_user, start_round, TEST_PASSWORD};
use crate::support::{build_test_state, db};

#[tokio::test]
async fn register_rejects_bad_input() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let service = UserService::new();

    for (username, email, password) in [
        ("", "a@example.test", "long-enough"),
        ("ace", "nope", "long-enough"),
        ("ace", "ace@example.test", "short"),
    ] {
        let txn = db.begin().await?;
        let err = service
            .register(&txn, username, email, password)
            .await
            .unwrap_err();
        txn.rollback().await?;
        assert_eq!(err.code(), ErrorCode::ValidationError, "{username:?} {email:?}");
    }
    Ok(())
}

#[tokio::test]
async fn login_with_good_and_bad_credentials() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "login").await;
    let service = UserService::new();

    let token = service
        .login(db, &state.security, &user.username, TEST_PASSWORD)
        .await?;
    let claims = verify_access_token(&token.access_token, &state.security)?;
    assert_eq!(claims.user_id()?, user.id);
    assert_eq!(token.token_type, "Bearer");

    let wrong_password = service
        .login(db, &state.security, &user.username, "not-the-password")
        .await
        .unwrap_err();
    let unknown_user = service
        .login(db, &state.security, "ghost", TEST_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(wrong_password.code(), ErrorCode::InvalidCredentials);
    assert_eq!(unknown_user.code(), ErrorCode::InvalidCredentials);
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    Ok(())
}

#[tokio::test]
async fn profile_counts_rounds_and_edits() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "profile").await;
    let taken = create_user(db, "taken").await;
    let course = create_course(db, "profile", &[3]).await;
    start_round(db, user.id, course.id, "").await;
    start_round(db, user.id, course.id, "").await;

    let service = UserService::new();
    let profile = service.get_user(db, &user.username).await?;
    assert_eq!(profile.round_count, 2);
    assert_eq!(
        service.get_user(db, "ghost").await.unwrap_err().code(),
        ErrorCode::UserNotFound
    );

    let txn = db.begin().await?;
    let err = service
        .edit_profile(&txn, user.id, &taken.username, "fresh@example.test")
        .await
        .unwrap_err();
    txn.rollback().await?;
    assert_eq!(err.code(), ErrorCode::UniqueUsername);

    let txn = db.begin().await?;
    let updated = service
        .edit_profile(&txn, user.id, "renamed", "Renamed@Example.test")
        .await?;
    txn.commit().await?;
    assert_eq!(updated.username, "renamed");
    assert_eq!(updated.email, "renamed@example.test");
    Ok(())
}

#[tokio::test]
async fn list_rounds_pages_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = db(&state);
    let user = create_user(db, "history").await;
    let course = create_course(db, "history", &[4, 4]).await;

    let mut last = 0;
    for _ in 0..7 {
        last = start_round(db, user.id, course.id, "").await.id;
    }

    let page = UserService::new().list_rounds(db, user.id, 1).await?;
    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items[0].round_id, last);
    assert_eq!(page.items[0].total, 8);
    assert_eq!(page.items[0].vs_par, 0);
    assert_eq!(page.items[0].course_name, course.name);

    let page2 = UserService::new().list_rounds(db, user.id, 2).await?;
    assert_eq!(page2.items.len(), 2);
    assert!(!page2.has_next);
    Ok(())
}
