//! Request extractors.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use farmgate_auth::{AuthUser, Claims};

/// The authenticated user, extracted from a verified bearer token.
///
/// Rejects with 401 when the header is absent, malformed, or the token
/// fails verification.
pub struct Identity(pub AuthUser);

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized)?;

        let claims: Claims = state.verifier.verify(token).await.map_err(|error| {
            tracing::debug!(%error, "bearer token rejected");
            ApiError::Unauthorized
        })?;

        Ok(Identity(AuthUser::from(claims)))
    }
}
