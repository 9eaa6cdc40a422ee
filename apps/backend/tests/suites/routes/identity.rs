use actix_web::test;
use ladder_backend::AppError;
use serde_json::{json, Value};

use crate::common::assert_problem;
use crate::support::app::{bearer, test_app};
use crate::support::factory::test_state;

#[actix_web::test]
async fn users_me_mirrors_token_identity() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;
    let app = test::init_service(test_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/users/me")
        .insert_header(bearer(&state, "Alex@Example.com"))
        .set_json(json!({ "name": "Alex" }))
        .to_request();
    let user: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(user["email"], "alex@example.com");
    assert_eq!(user["name"], "Alex");

    // Same identity, no body: same row.
    let req = test::TestRequest::post()
        .uri("/api/users/me")
        .insert_header(bearer(&state, "alex@example.com"))
        .to_request();
    let again: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(again["id"], user["id"]);
    Ok(())
}

#[actix_web::test]
async fn missing_or_bad_tokens_are_rejected() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;
    let app = test::init_service(test_app(state)).await;

    let req = test::TestRequest::post().uri("/api/users/me").to_request();
    assert_problem(test::call_service(&app, req).await, 401, "USER_NOT_AUTHENTICATED").await;

    let req = test::TestRequest::post()
        .uri("/api/users/me")
        .insert_header(("Authorization", "Basic abc"))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 401, "USER_NOT_AUTHENTICATED").await;

    let req = test::TestRequest::post()
        .uri("/api/users/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    assert_problem(test::call_service(&app, req).await, 401, "UNAUTHORIZED_INVALID_JWT").await;
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_bad_request() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;
    let app = test::init_service(test_app(state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/ladders")
        .insert_header(bearer(&state, "creator@example.com"))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let body = assert_problem(test::call_service(&app, req).await, 400, "BAD_REQUEST").await;
    assert!(body["detail"].is_string());
    Ok(())
}
