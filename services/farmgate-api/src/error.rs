//! API error mapping.
//!
//! Four categories, per the error-handling contract: validation (400),
//! unauthenticated (401), not-found (404), and everything else collapsed
//! into a generic 500 whose details go to the log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use farmgate_commerce::MarketError;
use farmgate_db::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error ready to leave the API boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid request data.
    #[error("{0}")]
    Validation(String),

    /// No usable identity on the request.
    #[error("Unauthorized")]
    Unauthorized,

    /// The referenced resource does not exist (or is not yours to touch).
    #[error("{0}")]
    NotFound(String),

    /// Anything unexpected.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(source) = &self {
            tracing::error!(error = ?source, "request failed");
        }
        let body = json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound("Not found".to_string()),
            StoreError::Conflict(message) => ApiError::Validation(message),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::ProductsNotFound(_)
            | MarketError::ProductNotFound(_)
            | MarketError::CategoryNotFound(_)
            | MarketError::CartNotFound(_)
            | MarketError::OrderNotFound(_) => ApiError::NotFound(err.to_string()),
            other => ApiError::Validation(other.to_string()),
        }
    }
}

/// Handler result alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use farmgate_commerce::ids::ProductId;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::NotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err: ApiError = StoreError::NotFound.into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_products_keep_their_ids_in_the_404() {
        let err: ApiError =
            MarketError::ProductsNotFound(vec![ProductId::new("p1"), ProductId::new("p2")]).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Products not found: p1, p2");
    }

    #[test]
    fn test_domain_validation_maps_to_400() {
        let err: ApiError = MarketError::InvalidQuantity(0).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
