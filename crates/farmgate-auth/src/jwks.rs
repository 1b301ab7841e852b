//! JWKS-backed token verification.
//!
//! The issuer publishes its RSA signing keys at
//! `<issuer>/.well-known/jwks.json`. Keys are cached in memory; an unknown
//! `kid` triggers one refetch before the token is rejected, so key
//! rotations do not require a restart.

use crate::error::AuthError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::RwLock;

/// One key from the issuer's JWKS document.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Jwk {
    #[serde(default)]
    pub kid: Option<String>,
    pub kty: String,
    #[serde(default)]
    pub n: Option<String>,
    #[serde(default)]
    pub e: Option<String>,
}

impl Jwk {
    fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        if self.kty != "RSA" {
            return Err(AuthError::InvalidToken(format!(
                "unsupported key type: {}",
                self.kty
            )));
        }
        let (Some(n), Some(e)) = (&self.n, &self.e) else {
            return Err(AuthError::InvalidToken(
                "JWKS key missing RSA components".to_string(),
            ));
        };
        Ok(DecodingKey::from_rsa_components(n, e)?)
    }
}

/// The issuer's key set.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    pub(crate) fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

/// Verifies RS256 tokens issued by a single hosted-identity tenant.
#[derive(Debug)]
pub struct JwksVerifier {
    http: reqwest::Client,
    issuer: String,
    cache: RwLock<Option<Jwks>>,
}

impl JwksVerifier {
    /// Create a verifier for the given issuer URL.
    pub fn new(issuer: impl Into<String>) -> Self {
        let issuer = issuer.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            issuer,
            cache: RwLock::new(None),
        }
    }

    /// The issuer this verifier trusts.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer)
    }

    async fn jwks(&self, refresh: bool) -> Result<Jwks, AuthError> {
        if !refresh {
            if let Some(cached) = self.cache.read().await.as_ref() {
                return Ok(cached.clone());
            }
        }
        let fetched: Jwks = self
            .http
            .get(self.jwks_url())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        tracing::debug!(keys = fetched.keys.len(), "fetched issuer JWKS");
        *self.cache.write().await = Some(fetched.clone());
        Ok(fetched)
    }

    /// Verify a token's RS256 signature and issuer, returning its claims.
    pub async fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<T, AuthError> {
        let header = decode_header(token)?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::InvalidToken("token header missing kid".to_string()))?;

        let jwks = self.jwks(false).await?;
        let jwk = match jwks.find(&kid) {
            Some(jwk) => jwk.clone(),
            None => {
                // Possibly rotated since the last fetch.
                let jwks = self.jwks(true).await?;
                jwks.find(&kid)
                    .cloned()
                    .ok_or_else(|| AuthError::UnknownKey(kid.clone()))?
            }
        };

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;

        let data = decode::<T>(token, &jwk.decoding_key()?, &validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JWKS: &str = r#"{
        "keys": [
            {"kid": "key-1", "kty": "RSA", "n": "AQAB", "e": "AQAB", "alg": "RS256", "use": "sig"},
            {"kid": "key-2", "kty": "RSA", "n": "AQAB", "e": "AQAB"}
        ]
    }"#;

    #[test]
    fn test_jwks_parsing_and_lookup() {
        let jwks: Jwks = serde_json::from_str(SAMPLE_JWKS).unwrap();
        assert_eq!(jwks.keys.len(), 2);
        assert!(jwks.find("key-2").is_some());
        assert!(jwks.find("key-3").is_none());
    }

    #[test]
    fn test_rsa_key_builds() {
        let jwks: Jwks = serde_json::from_str(SAMPLE_JWKS).unwrap();
        let jwk = jwks.find("key-1").unwrap();
        assert!(jwk.decoding_key().is_ok());
    }

    #[test]
    fn test_non_rsa_key_rejected() {
        let jwk: Jwk =
            serde_json::from_str(r#"{"kid": "k", "kty": "EC", "n": "AQAB", "e": "AQAB"}"#)
                .unwrap();
        assert!(jwk.decoding_key().is_err());
    }

    #[test]
    fn test_issuer_trailing_slash_trimmed() {
        let verifier = JwksVerifier::new("https://tenant.kinde.com/");
        assert_eq!(verifier.issuer(), "https://tenant.kinde.com");
        assert_eq!(
            verifier.jwks_url(),
            "https://tenant.kinde.com/.well-known/jwks.json"
        );
    }
}
