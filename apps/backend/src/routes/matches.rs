use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use time::OffsetDateTime;

use crate::db::with_txn;
use crate::domain::scoring::SetScore;
use crate::error::AppError;
use crate::extractors::Identity;
use crate::services::match_history::{head_to_head, list_user_matches, user_ladder_stats};
use crate::services::match_reporting::{report_match_for_open_ladder, MatchReport};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct ReportMatchRequest {
    #[serde(with = "time::serde::rfc3339")]
    match_date: OffsetDateTime,
    winner_id: i64,
    loser_id: i64,
    sets: Vec<SetScore>,
}

#[derive(Debug, Deserialize)]
struct HistoryQuery {
    limit: Option<usize>,
}

/// POST /api/ladders/{ladder_id}/matches
///
/// Any signed-in caller may report; the players are named in the body.
async fn report_match(
    http_req: HttpRequest,
    _identity: Identity,
    path: web::Path<i64>,
    body: web::Json<ReportMatchRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let report = MatchReport {
        ladder_id: path.into_inner(),
        match_date: body.match_date,
        winner_id: body.winner_id,
        loser_id: body.loser_id,
        sets: body.sets,
    };
    let now = app_state.now();

    let record = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { report_match_for_open_ladder(txn, report, now).await })
    })
    .await?;
    Ok(HttpResponse::Created().json(record))
}

/// GET /api/ladders/{ladder_id}/players/{user_id}/matches?limit=N
async fn player_matches(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    query: web::Query<HistoryQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (ladder_id, user_id) = path.into_inner();
    let limit = query.limit;
    let matches = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { list_user_matches(txn, ladder_id, user_id, limit).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(matches))
}

/// GET /api/ladders/{ladder_id}/players/{user_id}/stats
async fn player_stats(
    http_req: HttpRequest,
    path: web::Path<(i64, i64)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (ladder_id, user_id) = path.into_inner();
    let stats = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { user_ladder_stats(txn, ladder_id, user_id).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /api/ladders/{ladder_id}/head-to-head/{user_a}/{user_b}
async fn rivalry(
    http_req: HttpRequest,
    path: web::Path<(i64, i64, i64)>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (ladder_id, user_a, user_b) = path.into_inner();
    let h2h = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move { head_to_head(txn, ladder_id, user_a, user_b).await })
    })
    .await?;
    Ok(HttpResponse::Ok().json(h2h))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{ladder_id}/matches").route(web::post().to(report_match)))
        .service(
            web::resource("/{ladder_id}/players/{user_id}/matches")
                .route(web::get().to(player_matches)),
        )
        .service(
            web::resource("/{ladder_id}/players/{user_id}/stats")
                .route(web::get().to(player_stats)),
        )
        .service(
            web::resource("/{ladder_id}/head-to-head/{user_a}/{user_b}")
                .route(web::get().to(rivalry)),
        );
}
