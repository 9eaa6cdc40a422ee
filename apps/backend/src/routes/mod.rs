use actix_web::web;

use crate::error::AppError;
use crate::errors::ErrorCode;

pub mod health;
pub mod ladders;
pub mod matches;
pub mod users;

/// Register every route. `main.rs` and the route tests share this so both
/// see the same paths and the same problem+json for malformed input.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid JSON body: {err}")).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid path: {err}")).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::bad_request(ErrorCode::BadRequest, format!("Invalid query: {err}")).into()
    }));

    cfg.service(web::scope("/health").configure(health::configure_routes))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/ladders")
                        .configure(ladders::configure_routes)
                        .configure(matches::configure_routes),
                )
                .service(web::scope("/users").configure(users::configure_routes)),
        );
}
