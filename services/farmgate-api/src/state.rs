//! Shared application state.

use farmgate_auth::{JwksVerifier, ProfileProvider};
use farmgate_db::Store;
use std::sync::Arc;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL store.
    pub store: Store,
    /// Verifier for bearer tokens and webhook JWTs.
    pub verifier: Arc<JwksVerifier>,
    /// Identity-provider profile lookups for product owners.
    pub profiles: Arc<dyn ProfileProvider>,
}
