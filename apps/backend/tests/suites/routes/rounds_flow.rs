use actix_web::test;
use serde_json::{json, Value};

use crate::common::assert_problem_details_structure;
use crate::support::factory::{bearer_for, create_course, create_user};
use crate::support::{build_test_state, build_test_state_with_weather, create_test_app, db, FixedWeather};

#[actix_web::test]
async fn play_a_full_round() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "golfer").await;
    let course = create_course(db(&state), "flow", &[4, 3]).await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/rounds")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "course_name": course.name }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let started: Value = test::read_body_json(resp).await;
    assert_eq!(started["weather_code"], "10d");
    assert_eq!(
        started["weather_icon_url"],
        "http://openweathermap.org/img/wn/10d.png"
    );
    assert_eq!(started["progress"]["state"], "in_progress");
    assert_eq!(started["progress"]["hole_number"], 1);
    let round_id = started["round_id"].as_i64().expect("round id");

    let req = test::TestRequest::get()
        .uri(&format!("/api/rounds/{round_id}/holes/1"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let hole: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(hole["state"], "in_progress");
    assert_eq!(hole["par"], 4);
    assert_eq!(hole["strokes"], 4);
    assert_eq!(hole["hole_count"], 2);

    let req = test::TestRequest::put()
        .uri(&format!("/api/rounds/{round_id}/holes/1"))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "strokes": 5, "out_of_bounds": true }))
        .to_request();
    let recorded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recorded["next_hole_number"], 2);
    assert_eq!(recorded["out_of_bounds"], true);

    let req = test::TestRequest::put()
        .uri(&format!("/api/rounds/{round_id}/holes/2"))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "strokes": 2 }))
        .to_request();
    let recorded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recorded["progress"]["state"], "complete");

    let req = test::TestRequest::get()
        .uri(&format!("/api/rounds/{round_id}/holes/3"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let done: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(done["state"], "complete");
    assert_eq!(done["round_id"], round_id);

    let req = test::TestRequest::get()
        .uri(&format!("/api/rounds/{round_id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(summary["total"], 7);
    assert_eq!(summary["vs_par"], 0);
    assert_eq!(summary["holes"][0]["out_of_bounds"], true);

    let req = test::TestRequest::get()
        .uri("/api/me/rounds")
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["items"][0]["round_id"], round_id);
    assert_eq!(mine["items"][0]["total"], 7);

    let req = test::TestRequest::get()
        .uri(&format!("/api/courses/{}/analysis", course.name))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let analysis: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(analysis["mean_round_score"], 7.0);
    assert_eq!(analysis["hole_means"][1]["mean"], 2.0);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/rounds/{round_id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status().as_u16(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/api/rounds/{round_id}"))
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "ROUND_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn weather_failure_still_starts_round() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state_with_weather(FixedWeather(None)).await?;
    let user = create_user(db(&state), "drizzle").await;
    let course = create_course(db(&state), "drizzle", &[3]).await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/rounds")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "course_name": course.name }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    let started: Value = test::read_body_json(resp).await;
    assert_eq!(started["weather_code"], "");
    assert_eq!(started["weather_icon_url"], Value::Null);
    Ok(())
}

#[actix_web::test]
async fn unknown_course_cannot_start_round() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "wanderer").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/api/rounds")
        .insert_header(("Authorization", auth))
        .set_json(json!({ "course_name": "Atlantis" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 404, "COURSE_NOT_FOUND").await;
    Ok(())
}

#[actix_web::test]
async fn strokes_need_only_be_positive() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let user = create_user(db(&state), "hacker").await;
    let course = create_course(db(&state), "strokes", &[4]).await;
    let round = crate::support::factory::start_round(db(&state), user.id, course.id, "").await;
    let auth = bearer_for(&state, &user);
    let app = create_test_app(state).with_prod_routes().build().await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/rounds/{}/holes/1", round.id))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({ "strokes": 0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details_structure(resp, 422, "VALIDATION_ERROR").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/rounds/{}/holes/1", round.id))
        .insert_header(("Authorization", auth))
        .set_json(json!({ "strokes": 120 }))
        .to_request();
    let recorded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recorded["strokes"], 120);
    Ok(())
}
