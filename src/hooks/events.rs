//! Hook event types.

use serde::{Deserialize, Serialize};

pub const SESSION_IDLE: &str = "session.idle";

/// Identifying details the host attaches to session events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProperties {
    #[serde(rename = "sessionID", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Events delivered by the host, tagged by their `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HookEvent {
    /// A session has been created.
    #[serde(rename = "session.created")]
    SessionCreated {
        #[serde(default)]
        properties: SessionProperties,
    },
    /// A session finished its work and is waiting for input.
    #[serde(rename = "session.idle")]
    SessionIdle {
        #[serde(default)]
        properties: SessionProperties,
    },
    /// A session failed.
    #[serde(rename = "session.error")]
    SessionError {
        #[serde(default)]
        properties: SessionProperties,
    },
    /// Any event type this crate does not act on.
    #[serde(other)]
    Other,
}

impl HookEvent {
    /// Build an event carrying only its type, as the CLI does.
    pub fn from_type(event_type: &str) -> Self {
        serde_json::from_value(serde_json::json!({ "type": event_type })).unwrap_or(HookEvent::Other)
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            HookEvent::SessionCreated { .. } => "session.created",
            HookEvent::SessionIdle { .. } => SESSION_IDLE,
            HookEvent::SessionError { .. } => "session.error",
            HookEvent::Other => "other",
        }
    }

    pub fn is_session_idle(&self) -> bool {
        matches!(self, HookEvent::SessionIdle { .. })
    }
}
