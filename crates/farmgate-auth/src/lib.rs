//! Hosted-identity integration for the Farmgate marketplace.
//!
//! Authentication is delegated wholesale to the hosted provider (Kinde):
//! this crate verifies what the provider signed and looks up what the
//! provider stores. It never touches credentials.
//!
//! - [`AuthUser`] — request-scoped user context built from verified
//!   bearer-token claims; handlers receive it explicitly instead of
//!   reading ambient session state.
//! - [`JwksVerifier`] — RS256 verification against the issuer's JWKS,
//!   used for both bearer tokens and the inbound event webhook.
//! - [`KindeClient`] — management-API client for seller profile lookups,
//!   behind the [`ProfileProvider`] seam.

mod error;
mod jwks;
mod kinde;
mod user;
mod webhook;

pub use error::AuthError;
pub use jwks::JwksVerifier;
pub use kinde::{KindeClient, NoProfiles, ProfileProvider, UserProfile};
pub use user::{AuthUser, Claims};
pub use webhook::{EventKind, WebhookEvent};
