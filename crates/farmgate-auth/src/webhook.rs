//! Inbound identity-provider events.
//!
//! Kinde delivers webhooks as a JWT in the raw request body, signed with
//! the same keys as user tokens. The claims carry an event `type` and a
//! free-form `data` payload.

use serde::Deserialize;

/// Claims of a verified webhook token.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Recognised event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    UserCreated,
    UserUpdated,
    Other,
}

impl WebhookEvent {
    /// Classify the event.
    pub fn kind(&self) -> EventKind {
        match self.event_type.as_deref() {
            Some("user.created") => EventKind::UserCreated,
            Some("user.updated") => EventKind::UserUpdated,
            _ => EventKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_events() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"type": "user.created", "data": {"user": {"id": "kp_1"}}}"#)
                .unwrap();
        assert_eq!(event.kind(), EventKind::UserCreated);

        let event: WebhookEvent = serde_json::from_str(r#"{"type": "user.updated"}"#).unwrap();
        assert_eq!(event.kind(), EventKind::UserUpdated);
    }

    #[test]
    fn test_unknown_and_missing_types() {
        let event: WebhookEvent =
            serde_json::from_str(r#"{"type": "organization.created"}"#).unwrap();
        assert_eq!(event.kind(), EventKind::Other);

        let event: WebhookEvent = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        assert_eq!(event.kind(), EventKind::Other);
    }
}
