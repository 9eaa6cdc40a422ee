use actix_web::http::StatusCode;
use actix_web::test;
use ladder_backend::AppError;
use serde_json::Value;

use crate::support::app::test_app;
use crate::support::factory::test_state;

#[actix_web::test]
async fn health_reports_database_and_clock() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;
    let app = test::init_service(test_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "ok");
    assert_eq!(body["time"], "2025-06-01T12:00:00Z");
    assert!(body.get("db_error").is_none());
    Ok(())
}

#[actix_web::test]
async fn incoming_request_id_is_echoed() -> Result<(), AppError> {
    let (state, _clock) = test_state().await?;
    let app = test::init_service(test_app(state)).await;

    let id = "0b6f8a8e-4a4f-4a8c-9f7e-2f9a3b1c5d7e";
    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), id);

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("x-request-id", "not-a-uuid"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_ne!(resp.headers().get("x-request-id").unwrap(), "not-a-uuid");
    Ok(())
}
