//! Auth error types.

use thiserror::Error;

/// Errors that can occur during identity operations.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No bearer token on the request.
    #[error("Missing bearer token")]
    MissingToken,

    /// The token is malformed or failed verification.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The token names a signing key the issuer does not publish.
    #[error("Unknown signing key: {0}")]
    UnknownKey(String),

    /// JWT decode/verify failure.
    #[error("Token verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// HTTP failure talking to the identity provider.
    #[error("Identity provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered, but not with what we asked for.
    #[error("Profile lookup failed: {0}")]
    ProfileLookup(String),
}
