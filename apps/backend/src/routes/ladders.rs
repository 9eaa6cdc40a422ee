use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::with_txn;
use crate::error::AppError;
use crate::extractors::Identity;
use crate::services::ladders::{self as ladders_service, CreateLadder, LadderSummary};
use crate::services::membership::join_ladder;
use crate::services::standings::{get_player_position, get_standings};
use crate::services::users::require_user;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateLadderRequest {
    name: String,
    #[serde(default)]
    password: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    end_date: OffsetDateTime,
    #[serde(default)]
    auto_add_creator: bool,
    #[serde(default)]
    algorithm: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SetActiveRequest {
    is_active: bool,
}

#[derive(Debug, Default, Deserialize)]
struct JoinRequest {
    #[serde(default)]
    password: Option<String>,
}

#[derive(Debug, Serialize)]
struct PositionResponse {
    ladder_id: i64,
    user_id: i64,
    position: usize,
}

#[derive(Debug, Serialize)]
struct MembershipResponse {
    ladder_id: i64,
    user_id: i64,
    is_member: bool,
}

/// POST /api/ladders
async fn create_ladder(
    http_req: HttpRequest,
    identity: Identity,
    body: web::Json<CreateLadderRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let email = identity.email().to_string();
    let now = app_state.now();

    let ladder = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let creator = require_user(txn, Some(email.as_str())).await?;
            let req = CreateLadder {
                name: body.name,
                password: body.password,
                start_date: body.start_date,
                end_date: body.end_date,
                created_by: creator.id,
                auto_add_creator: body.auto_add_creator,
                algorithm: body.algorithm,
            };
            ladders_service::create_ladder(txn, req, now).await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(LadderSummary::from(ladder)))
}

/// GET /api/ladders
async fn list_ladders(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ladders = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { ladders_service::list_ladders(txn).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(ladders))
}

/// GET /api/ladders/{ladder_id}
async fn get_ladder(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ladder_id = path.into_inner();
    let ladder = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { ladders_service::get_ladder(txn, ladder_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(ladder))
}

/// PUT /api/ladders/{ladder_id}/active
async fn set_active(
    http_req: HttpRequest,
    identity: Identity,
    path: web::Path<i64>,
    body: web::Json<SetActiveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ladder_id = path.into_inner();
    let is_active = body.is_active;
    let email = identity.email().to_string();

    let ladder = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let user = require_user(txn, Some(email.as_str())).await?;
            ladders_service::set_ladder_active(txn, ladder_id, is_active, user.id).await
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(LadderSummary::from(ladder)))
}

/// POST /api/ladders/{ladder_id}/join
///
/// Anonymous callers reach the service so it can answer with
/// `USER_NOT_AUTHENTICATED`. The body is optional.
async fn join(
    http_req: HttpRequest,
    identity: Option<Identity>,
    path: web::Path<i64>,
    body: Option<web::Json<JoinRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ladder_id = path.into_inner();
    let email = identity.map(|id| id.email().to_string());
    let password = body.and_then(|b| b.into_inner().password);
    let now = app_state.now();

    let outcome = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            join_ladder(txn, ladder_id, email.as_deref(), password.as_deref(), now).await
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// DELETE /api/ladders/{ladder_id}/members/{user_id}
async fn remove_member(
    http_req: HttpRequest,
    identity: Identity,
    path: web::Path<(i64, i64)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (ladder_id, user_id) = path.into_inner();
    let email = identity.email().to_string();

    with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let remover = require_user(txn, Some(email.as_str())).await?;
            ladders_service::remove_member(txn, ladder_id, user_id, remover.id).await
        })
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/ladders/{ladder_id}/members
async fn standings(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ladder_id = path.into_inner();
    let entries = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { get_standings(txn, ladder_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// GET /api/ladders/{ladder_id}/members/{user_id}
async fn membership(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (ladder_id, user_id) = path.into_inner();
    let is_member = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { ladders_service::is_member(txn, ladder_id, Some(user_id)).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(MembershipResponse {
        ladder_id,
        user_id,
        is_member,
    }))
}

/// GET /api/ladders/{ladder_id}/position/{user_id}
async fn position(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (ladder_id, user_id) = path.into_inner();
    let position = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { get_player_position(txn, ladder_id, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(PositionResponse {
        ladder_id,
        user_id,
        position,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_ladders))
            .route(web::post().to(create_ladder)),
    )
    .service(web::resource("/{ladder_id}").route(web::get().to(get_ladder)))
    .service(web::resource("/{ladder_id}/active").route(web::put().to(set_active)))
    .service(web::resource("/{ladder_id}/join").route(web::post().to(join)))
    .service(web::resource("/{ladder_id}/members").route(web::get().to(standings)))
    .service(
        web::resource("/{ladder_id}/members/{user_id}")
            .route(web::get().to(membership))
            .route(web::delete().to(remove_member)),
    )
    .service(web::resource("/{ladder_id}/position/{user_id}").route(web::get().to(position)));
}
