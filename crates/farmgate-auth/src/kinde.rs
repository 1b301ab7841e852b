//! Kinde management-API client.
//!
//! Used for one thing: resolving a product owner's display profile for the
//! public product-detail endpoint. Lookups authenticate with a
//! client-credentials token, cached until shortly before expiry.

use crate::error::AuthError;
use async_trait::async_trait;
use farmgate_commerce::ids::UserId;
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// A user profile as stored by the identity provider.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    /// "First Last" when a first name is on file.
    pub fn display_name(&self) -> Option<String> {
        let first = self.first_name.as_deref()?;
        Some(match self.last_name.as_deref() {
            Some(last) => format!("{first} {last}"),
            None => first.to_string(),
        })
    }
}

/// Seam for profile lookups, so handlers do not care whether the provider
/// is configured.
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch a user's profile; `Ok(None)` when the provider has nothing.
    async fn profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, AuthError>;
}

/// Stand-in provider for deployments without management-API credentials.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProfiles;

#[async_trait]
impl ProfileProvider for NoProfiles {
    async fn profile(&self, _user_id: &UserId) -> Result<Option<UserProfile>, AuthError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug)]
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Client-credentials client for the Kinde management API.
#[derive(Debug)]
pub struct KindeClient {
    http: reqwest::Client,
    issuer: String,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl KindeClient {
    /// Refresh the cached token this long before it actually expires.
    const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

    pub fn new(
        issuer: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            issuer: issuer.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.expires_at {
                return Ok(token.access_token.clone());
            }
        }

        let audience = format!("{}/api", self.issuer);
        let response: TokenResponse = self
            .http
            .post(format!("{}/oauth2/token", self.issuer))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("audience", audience.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let lifetime = Duration::from_secs(response.expires_in.unwrap_or(3600));
        let expires_at = Instant::now() + lifetime.saturating_sub(Self::EXPIRY_MARGIN);
        let token = response.access_token.clone();
        *cached = Some(CachedToken {
            access_token: response.access_token,
            expires_at,
        });
        Ok(token)
    }
}

#[async_trait]
impl ProfileProvider for KindeClient {
    async fn profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, AuthError> {
        let token = self.access_token().await?;
        let response = self
            .http
            .get(format!("{}/api/v1/user", self.issuer))
            .query(&[("id", user_id.as_str())])
            .bearer_auth(token)
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AuthError::ProfileLookup(format!(
                "provider returned {}",
                response.status()
            )));
        }
        Ok(Some(response.json().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let profile = UserProfile {
            first_name: Some("Amina".to_string()),
            last_name: Some("Bello".to_string()),
            picture: None,
        };
        assert_eq!(profile.display_name().unwrap(), "Amina Bello");

        let first_only = UserProfile {
            first_name: Some("Amina".to_string()),
            ..UserProfile::default()
        };
        assert_eq!(first_only.display_name().unwrap(), "Amina");

        assert!(UserProfile::default().display_name().is_none());
    }

    #[tokio::test]
    async fn test_no_profiles_provider() {
        let provider = NoProfiles;
        let profile = provider.profile(&UserId::new("kp_x")).await.unwrap();
        assert!(profile.is_none());
    }
}
