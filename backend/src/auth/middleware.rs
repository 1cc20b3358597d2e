//! Authentication middleware
//!
//! Protected handlers take [`AuthUser`] as an argument. Extraction runs before
//! the handler body, so a rejected request never reaches the service or
//! storage.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use gym_groups_shared::AuthError;
use tracing::debug;

/// Authenticated caller, identified by the token's `sub` claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Extract the token from an `Authorization` header value
///
/// The value must be exactly `Bearer <token>`: one space, case-sensitive
/// scheme, non-empty token.
pub fn bearer_token(header: &str) -> Result<&str, AuthError> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingToken)?
            .to_str()
            .map_err(|_| AuthError::MalformedHeader)?;

        let token = bearer_token(header)?;

        let user_id = app_state.jwt().verify_subject(token).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            e
        })?;

        Ok(AuthUser { user_id })
    }
}
