//! Request identity extractors

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use menu_core::domain::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Verified identity; rejects with 401 when the bearer token is absent or
/// invalid.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

/// Optional identity; an absent or invalid bearer token degrades to
/// anonymous instead of rejecting.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Identity>);

fn identity_from_parts(parts: &Parts, state: &AppState) -> Option<Identity> {
    let header = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    let claims = state.jwt.validate_token(token).ok()?;
    let user_id = claims.sub.parse().ok()?;
    Some(Identity::new(user_id, claims.username))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        identity_from_parts(parts, state)
            .map(AuthUser)
            .ok_or_else(|| ApiError::Unauthorized("Missing or invalid bearer token".to_string()))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(identity_from_parts(parts, state)))
    }
}
