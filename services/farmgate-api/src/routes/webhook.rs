//! Inbound identity-provider webhook.
//!
//! The provider posts a JWT as the raw request body. Verification uses the
//! same JWKS as bearer tokens; a token that fails to verify is a 400, not
//! a 401 — the caller is a machine, not a user session.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use farmgate_auth::{EventKind, WebhookEvent};
use serde_json::json;

/// POST /api/kinde-webhook
pub async fn receive(
    State(state): State<AppState>,
    body: String,
) -> ApiResult<Json<serde_json::Value>> {
    let event: WebhookEvent = state
        .verifier
        .verify(body.trim())
        .await
        .map_err(|error| ApiError::Validation(error.to_string()))?;

    match event.kind() {
        EventKind::UserCreated => {
            tracing::info!(data = %event.data, "identity provider reported user.created");
        }
        EventKind::UserUpdated => {
            tracing::info!(data = %event.data, "identity provider reported user.updated");
        }
        EventKind::Other => {
            tracing::debug!(event_type = ?event.event_type, "ignoring webhook event");
        }
    }

    Ok(Json(json!({ "status": 200, "statusText": "success" })))
}
