use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

use crate::error::ApiError;
use crate::models::{User, UserId};
use crate::routes::AppState;

/// Caller identity resolved from an `Authorization: Bearer <token>` header
///
/// Only the token is checked here; use [`current_user`] to load the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
}

impl AuthenticatedUser {
    fn from_headers(req: &HttpRequest) -> Result<Self, ApiError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| ApiError::Internal("Application state is not configured".to_string()))?;

        let value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Not authenticated"))?;

        let id = state.tokens.verify(token).map_err(|e| {
            tracing::debug!("Rejected bearer token on {}: {}", req.path(), e);
            ApiError::unauthorized("Invalid or expired token")
        })?;

        Ok(Self { id })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_headers(req))
    }
}

/// Load the account behind a verified token
pub async fn current_user(state: &AppState, auth: AuthenticatedUser) -> Result<User, ApiError> {
    state
        .store
        .get_user(auth.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))
}
