use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::jwt::{verify_access_token, Claims};
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Verified claims from an `Authorization: Bearer <jwt>` header.
///
/// Take `Option<Identity>` where an anonymous caller is allowed to reach the
/// service layer (it then decides what "not signed in" means).
#[derive(Debug, Clone)]
pub struct Identity(pub Claims);

impl Identity {
    pub fn email(&self) -> &str {
        &self.0.email
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(AppError::unauthenticated)?
        .to_str()
        .map_err(|_| AppError::unauthenticated())?;

    match value.split_once(' ') {
        Some(("Bearer", token)) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::unauthenticated()),
    }
}

fn extract(req: &HttpRequest) -> Result<Identity, AppError> {
    let token = bearer_token(req)?;
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not configured"))?;
    verify_access_token(token, &state.security).map(Identity)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
