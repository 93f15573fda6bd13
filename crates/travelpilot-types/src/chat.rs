//! Chat session and message types for TravelPilot.
//!
//! These types model conversations ("trips") between the user and the remote
//! travel assistant: messages, the server-issued session identifier, and the
//! stored session record.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// A single message within a conversation.
///
/// Messages are immutable once created; their position in the owning
/// sequence is their order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Opaque session identifier issued by the assistant service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A stored conversation ("trip").
///
/// The title is fixed when the session is created and never rewritten by
/// later turns. `created_at` is persisted as epoch milliseconds under the
/// `createdAt` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(
        rename = "createdAt",
        with = "chrono::serde::ts_milliseconds",
        default = "unix_epoch"
    )]
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create a session stamped with the current time.
    ///
    /// The timestamp is truncated to milliseconds so that it survives a
    /// persistence round-trip unchanged.
    pub fn new(id: SessionId, title: String, messages: Vec<Message>) -> Self {
        Self {
            id,
            title,
            messages,
            created_at: Utc::now().trunc_subsecs(3),
        }
    }
}

fn unix_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

/// Successful result of one call to the assistant service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub response: String,
    pub session_id: SessionId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("system".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_message_serialize_shape() {
        let msg = Message::user("Villas in Bali");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Villas in Bali"}"#);
    }

    #[test]
    fn test_session_id_is_bare_string() {
        let id = SessionId::new("abc123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc123\"");
        assert_eq!(id.to_string(), "abc123");
    }

    #[test]
    fn test_chat_session_uses_epoch_millis() {
        let session = ChatSession {
            id: SessionId::new("abc123"),
            title: "Villas in Bali".to_string(),
            messages: vec![Message::user("Villas in Bali")],
            created_at: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["createdAt"], 1_700_000_000_123_i64);
        assert_eq!(json["id"], "abc123");
    }

    #[test]
    fn test_chat_session_tolerates_missing_created_at() {
        let json = r#"{"id":"x","title":"Old trip","messages":[],"extra":true}"#;
        let session: ChatSession = serde_json::from_str(json).unwrap();
        assert_eq!(session.created_at.timestamp_millis(), 0);
        assert_eq!(session.title, "Old trip");
    }

    #[test]
    fn test_new_session_truncates_to_millis() {
        let session = ChatSession::new(SessionId::new("a"), "t".to_string(), Vec::new());
        assert_eq!(session.created_at.timestamp_subsec_nanos() % 1_000_000, 0);
    }
}
