use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::{error, warn};
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::{error::ApiError, state::AppState, users::repo_types::Role};

pub const NOT_LOGGED_IN: &str = "not logged in";
pub const INVALID_TOKEN: &str = "invalid or expired token";

/// Identity resolved from a bearer token.
///
/// Rejecting here means the handler never runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized(NOT_LOGGED_IN))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized(NOT_LOGGED_IN))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::unauthorized(INVALID_TOKEN)
        })?;

        let user = state
            .users
            .find_by_id(claims.sub)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %claims.sub, "auth user lookup failed");
                ApiError::from(e)
            })?
            .ok_or_else(|| {
                warn!(user_id = %claims.sub, "token subject no longer exists");
                ApiError::unauthorized(INVALID_TOKEN)
            })?;

        Ok(AuthUser {
            id: user.id,
            name: user.name,
            role: user.role,
        })
    }
}
