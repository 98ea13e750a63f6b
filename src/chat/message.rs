//! Chat message types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text shown in the typing placeholder.
pub const TYPING_TEXT: &str = "Analyzing...";

/// Opaque message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Borrow the identifier as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one user-initiated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(u64);

impl TurnId {
    /// Wrap a raw turn number.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw turn number.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "turn-{}", self.0)
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person using the client.
    User,
    /// The advisor backend.
    Bot,
}

/// A single transcript entry.
///
/// Messages are never edited; a placeholder is removed and a new message
/// appended in its place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id.
    pub id: MessageId,
    /// Display text.
    pub content: String,
    /// Author.
    pub sender: Sender,
    /// Creation time.
    pub timestamp: DateTime<Utc>,
    /// Marks the not-yet-resolved placeholder of a pending turn.
    #[serde(default)]
    pub is_typing: bool,
    /// Turn that inserted this placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn: Option<TurnId>,
}

impl Message {
    fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: MessageId::generate(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            is_typing: false,
            turn: None,
        }
    }

    /// A message from the user.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    /// A message from the advisor.
    #[must_use]
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot)
    }

    /// The typing placeholder for a turn.
    #[must_use]
    pub fn typing(turn: TurnId) -> Self {
        Self {
            is_typing: true,
            turn: Some(turn),
            ..Self::new(TYPING_TEXT, Sender::Bot)
        }
    }

    /// Returns true if this is the placeholder of `turn`.
    #[must_use]
    pub fn is_placeholder_for(&self, turn: TurnId) -> bool {
        self.is_typing && self.turn == Some(turn)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(Message::user("a").id, Message::user("a").id);
    }

    #[test]
    fn test_typing_placeholder() {
        let msg = Message::typing(TurnId::new(3));
        assert!(msg.is_typing);
        assert_eq!(msg.sender, Sender::Bot);
        assert!(msg.is_placeholder_for(TurnId::new(3)));
        assert!(!msg.is_placeholder_for(TurnId::new(4)));
    }

    #[test]
    fn test_regular_messages_are_not_placeholders() {
        let msg = Message::bot("hi");
        assert!(!msg.is_typing);
        assert!(msg.turn.is_none());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(!json.contains("\"turn\""));
    }

    #[test]
    fn test_turn_id_display() {
        assert_eq!(TurnId::new(7).to_string(), "turn-7");
        assert_eq!(TurnId::new(7).get(), 7);
    }
}
