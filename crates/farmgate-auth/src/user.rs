//! Request-scoped user context.

use farmgate_commerce::ids::UserId;
use serde::{Deserialize, Serialize};

/// Claims extracted from a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the provider's user id.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// The authenticated user for one request.
///
/// Built once from verified claims and passed explicitly into handlers;
/// there is no ambient session state.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser {
    pub id: UserId,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}

impl AuthUser {
    /// Display name for snapshots (blog author, etc.).
    pub fn display_name(&self) -> String {
        match (&self.given_name, &self.family_name) {
            (Some(given), Some(family)) => format!("{given} {family}"),
            (Some(given), None) => given.clone(),
            _ => "Unknown".to_string(),
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: UserId::new(claims.sub),
            email: claims.email,
            given_name: claims.given_name,
            family_name: claims.family_name,
            picture: claims.picture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_from_claims() {
        let claims = Claims {
            sub: "kp_abc123".to_string(),
            email: Some("amina@example.com".to_string()),
            given_name: Some("Amina".to_string()),
            family_name: Some("Bello".to_string()),
            picture: None,
        };
        let user = AuthUser::from(claims);
        assert_eq!(user.id.as_str(), "kp_abc123");
        assert_eq!(user.display_name(), "Amina Bello");
    }

    #[test]
    fn test_display_name_fallback() {
        let user = AuthUser {
            id: UserId::new("kp_x"),
            email: None,
            given_name: None,
            family_name: None,
            picture: None,
        };
        assert_eq!(user.display_name(), "Unknown");
    }

    #[test]
    fn test_claims_tolerate_missing_profile_fields() {
        let claims: Claims = serde_json::from_str(r#"{"sub": "kp_y"}"#).unwrap();
        assert_eq!(claims.sub, "kp_y");
        assert!(claims.email.is_none());
    }
}
