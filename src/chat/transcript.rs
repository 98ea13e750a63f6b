//! Ordered list of chat messages.

use super::message::{Message, TurnId};

/// Bot message shown when the session starts or is reset.
pub const WELCOME_TEXT: &str = "Welcome to your fantasy football advisor! Set your league id and \
Sleeper username with /settings, then ask me anything about your team.";

/// The conversation as shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// An empty transcript.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// A transcript holding only the welcome message.
    #[must_use]
    pub fn with_welcome() -> Self {
        Self {
            messages: vec![Message::bot(WELCOME_TEXT)],
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Remove the placeholder belonging to `turn`.
    ///
    /// Returns true if one was found.
    pub fn remove_placeholder(&mut self, turn: TurnId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !m.is_placeholder_for(turn));
        self.messages.len() != before
    }

    /// The typing placeholder, if a turn is pending.
    #[must_use]
    pub fn placeholder(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.is_typing)
    }

    /// All messages in order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if there are no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
