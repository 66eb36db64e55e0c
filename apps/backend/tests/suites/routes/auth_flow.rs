use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::{build_test_state, create_test_app};

#[actix_web::test]
async fn register_login_and_use_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "eagle",
            "email": "Eagle@Example.test",
            "password": "fairway-123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let account: Value = test::read_body_json(resp).await;
    assert_eq!(account["username"], "eagle");
    assert_eq!(account["email"], "eagle@example.test");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "eagle", "password": "fairway-123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let token: Value = test::read_body_json(resp).await;
    assert_eq!(token["token_type"], "Bearer");
    let access = token["access_token"].as_str().expect("token").to_string();

    let req = test::TestRequest::get()
        .uri("/api/users/eagle")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let profile: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(profile["username"], "eagle");
    assert_eq!(profile["round_count"], 0);

    let req = test::TestRequest::put()
        .uri("/api/me")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .set_json(json!({ "username": "albatross", "email": "alba@example.test" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["username"], "albatross");
    Ok(())
}

#[actix_web::test]
async fn duplicate_registration_is_409() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let register = |email: &str| {
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "username": "twin",
                "email": email,
                "password": "fairway-123"
            }))
            .to_request()
    };

    let resp = test::call_service(&app, register("twin@example.test")).await;
    assert_eq!(resp.status().as_u16(), 201);

    let resp = test::call_service(&app, register("other@example.test")).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_USERNAME").await;
    Ok(())
}

#[actix_web::test]
async fn bad_password_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "username": "shank",
            "email": "shank@example.test",
            "password": "fairway-123"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 201);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "shank", "password": "wrong-one" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 401, "INVALID_CREDENTIALS").await;
    Ok(())
}
