//! Chat transcript, turn lifecycle and dispatch.
//!
//! - [`Message`] / [`Transcript`]: what the user sees
//! - [`KeywordClassifier`]: routes free text to `analyze-team` or `chat`
//! - [`QuickAction`]: predefined prompts
//! - [`ChatSession`]: state plus pure transitions
//! - [`ChatController`]: runs turns against an [`AdvisorApi`](crate::traits::AdvisorApi)

mod classifier;
mod controller;
mod message;
mod quick;
mod session;
mod transcript;

pub use classifier::{KeywordClassifier, Route, ANALYSIS_KEYWORDS};
pub use controller::ChatController;
pub use message::{Message, MessageId, Sender, TurnId, TYPING_TEXT};
pub use quick::QuickAction;
pub use session::{
    analysis_summary, trade_summary, ChatSession, Completion, PendingTurn, TurnKind, TurnOutcome,
    TurnRejected, TurnRequest, APOLOGY_TEXT,
};
pub use transcript::{Transcript, WELCOME_TEXT};
