use actix_web::test;
use birdie::state::app_state::AppState;
use birdie::state::security_config::SecurityConfig;
use serde_json::json;

use crate::common::assert_problem_details_structure;
use crate::support::factory::{bearer_for, create_course, create_user, start_round};
use crate::support::test_state::TEST_JWT_SECRET;
use crate::support::{build_test_state, create_test_app, db};

#[actix_web::test]
async fn missing_bearer_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/api/courses").to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED_MISSING_BEARER").await;
    Ok(())
}

#[actix_web::test]
async fn garbage_token_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/courses")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "UNAUTHORIZED_INVALID_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn unknown_course_is_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "notfound").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/api/courses/Nowhere%20Links")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details_structure(resp, 404, "COURSE_NOT_FOUND").await;
    assert_eq!(problem["title"], "Course Not Found");
    Ok(())
}

#[actix_web::test]
async fn validation_failure_is_422() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "invalid").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "name": "Too Many", "hole_count": 40, "location": "Fife" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 422, "VALIDATION_ERROR").await;
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let problem = assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;
    assert_eq!(problem["detail"], "Request body is empty");
    Ok(())
}

#[actix_web::test]
async fn bad_round_id_is_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "badid").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    for uri in ["/api/rounds/abc", "/api/rounds/0", "/api/rounds/-4"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details_structure(resp, 400, "INVALID_ROUND_ID").await;
    }
    Ok(())
}

#[actix_web::test]
async fn foreign_round_is_403() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let owner = create_user(db(&state), "own").await;
    let other = create_user(db(&state), "other").await;
    let course = create_course(db(&state), "own", &[4, 4]).await;
    let round = start_round(db(&state), owner.id, course.id, "").await;
    let auth = bearer_for(&state, &other);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/rounds/{}/holes/1", round.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({ "strokes": 2 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 403, "NOT_ROUND_OWNER").await;
    Ok(())
}

#[actix_web::test]
async fn missing_database_is_503() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::without_db(SecurityConfig::new(TEST_JWT_SECRET));
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "ace", "password": "fairway-123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 503, "DB_UNAVAILABLE").await;
    Ok(())
}
