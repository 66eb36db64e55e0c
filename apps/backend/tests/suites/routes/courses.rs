use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::factory::{bearer_for, create_user};
use crate::support::{build_test_state, create_test_app, db};

#[actix_web::test]
async fn create_edit_and_read_course() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "designer").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "name": "Carnoustie", "hole_count": 3, "location": "Angus, GB" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["hole_count"], 3);
    assert!(created.get("holes").is_none());

    let req = test::TestRequest::put()
        .uri("/api/courses/Carnoustie/holes/2")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "par": 5, "length": 512 }))
        .to_request();
    let hole: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(hole["par"], 5);
    assert_eq!(hole["length"], 512);

    let req = test::TestRequest::get()
        .uri("/api/courses/Carnoustie")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["par"], 11);
    assert_eq!(detail["holes"].as_array().map(Vec::len), Some(3));
    assert_eq!(detail["holes"][0]["length"], Value::Null);

    let req = test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "name": "Carnoustie", "hole_count": 18, "location": "Angus, GB" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 409, "UNIQUE_COURSE_NAME").await;
    Ok(())
}

#[actix_web::test]
async fn list_is_paged_by_five() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "lister").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    for i in 0..6 {
        let req = test::TestRequest::post()
            .uri("/api/courses")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({ "name": format!("Links {i}"), "hole_count": 9, "location": "Fife" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status().as_u16(), 201);
    }

    let req = test::TestRequest::get()
        .uri("/api/courses")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["items"].as_array().map(Vec::len), Some(5));
    assert_eq!(page["has_next"], true);
    assert_eq!(page["total_items"], 6);

    let req = test::TestRequest::get()
        .uri("/api/courses?page=2")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let page: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(page["items"].as_array().map(Vec::len), Some(1));

    let req = test::TestRequest::get()
        .uri("/api/courses?page=two")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 400, "BAD_REQUEST").await;
    Ok(())
}
