use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::db::with_txn;
use crate::error::AppError;
use crate::extractors::Identity;
use crate::services::ladders::{list_ladders_by_creator, list_user_ladders};
use crate::services::users::ensure_user;
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
struct ProfileRequest {
    #[serde(default)]
    name: String,
    #[serde(default)]
    image_url: Option<String>,
}

/// POST /api/users/me
///
/// Mirrors the token's identity into the users table and records the login.
async fn ensure_me(
    http_req: HttpRequest,
    identity: Identity,
    body: Option<web::Json<ProfileRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = identity.email().to_string();
    let profile = body.map(web::Json::into_inner).unwrap_or_default();
    let now = app_state.now();

    let user = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            ensure_user(txn, &email, &profile.name, profile.image_url.as_deref(), now).await
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(user))
}

/// GET /api/users/{user_id}/ladders
async fn joined_ladders(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let ladders = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { list_user_ladders(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(ladders))
}

/// GET /api/users/{user_id}/created-ladders
async fn created_ladders(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let ladders = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { list_ladders_by_creator(txn, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(ladders))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/me").route(web::post().to(ensure_me)))
        .service(web::resource("/{user_id}/ladders").route(web::get().to(joined_ladders)))
        .service(
            web::resource("/{user_id}/created-ladders").route(web::get().to(created_ladders)),
        );
}
