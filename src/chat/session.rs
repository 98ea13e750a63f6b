//! Chat session state and its transitions.
//!
//! [`ChatSession`] owns everything the user sees: transcript, settings,
//! settings form and the latest analysis snapshot. Every transition is a
//! plain synchronous method; the controller only sequences them around
//! network calls.
//!
//! Turn lifecycle:
//!
//! ```text
//! Idle --begin_turn--> Awaiting (user msg + placeholder) --complete_turn--> Idle
//! ```
//!
//! A completion is applied only if its [`TurnId`] matches the pending turn;
//! anything else is stale and dropped.

use crate::api::{AnalysisResult, ChatReply, TradeAnalysis};
use crate::error::{ApiError, SettingsError};
use crate::settings::{SettingsForm, SettingsStore, UserSettings};
use crate::traits::IntentClassifier;

use super::classifier::Route;
use super::message::{Message, TurnId};
use super::quick::QuickAction;
use super::transcript::Transcript;

/// Bot message appended when a turn fails for any reason.
pub const APOLOGY_TEXT: &str =
    "Sorry, I encountered an error while analyzing your request. Please check your settings and try again.";

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRequest {
    /// Free text, routed by the classifier.
    Message(String),
    /// Predefined prompt, always a team analysis.
    Quick(QuickAction),
    /// Trade evaluation.
    Trade(String),
}

/// Which endpoint a pending turn must call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    /// `analyze-team`.
    AnalyzeTeam,
    /// `chat`.
    Chat,
    /// `analyze-trade`.
    Trade,
}

impl From<Route> for TurnKind {
    fn from(route: Route) -> Self {
        match route {
            Route::AnalyzeTeam => Self::AnalyzeTeam,
            Route::Chat => Self::Chat,
        }
    }
}

/// A turn that has been started and awaits its response.
///
/// Carries a snapshot of the settings taken when the turn began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Turn identifier.
    pub id: TurnId,
    /// Endpoint to call.
    pub kind: TurnKind,
    /// Question, message or trade details to send.
    pub text: String,
    /// Settings at the time the turn began.
    pub settings: UserSettings,
}

/// Why a turn was not started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnRejected {
    /// The input was blank.
    Empty,
    /// Another turn is still awaiting its response.
    Busy,
    /// League id or username missing; the settings form was opened.
    SettingsIncomplete(SettingsError),
}

impl std::fmt::Display for TurnRejected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("nothing to send"),
            Self::Busy => f.write_str("still waiting for the previous answer"),
            Self::SettingsIncomplete(e) => write!(f, "{e}; please complete your settings"),
        }
    }
}

/// Result of the network call for a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// Team analysis arrived.
    Analysis(AnalysisResult),
    /// Chat reply arrived.
    Chat(ChatReply),
    /// Trade evaluation arrived.
    Trade(TradeAnalysis),
    /// The call failed.
    Failed(ApiError),
}

/// What `complete_turn` did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The placeholder was replaced by a bot message.
    Applied,
    /// The turn was no longer pending; nothing changed.
    Stale,
}

/// The whole visible state of one chat session.
#[derive(Debug, Clone)]
pub struct ChatSession {
    transcript: Transcript,
    settings: SettingsStore,
    settings_form: SettingsForm,
    analysis: Option<AnalysisResult>,
    pending: Option<PendingTurn>,
    next_turn: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// A new session with the welcome message and empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transcript: Transcript::with_welcome(),
            settings: SettingsStore::new(),
            settings_form: SettingsForm::default(),
            analysis: None,
            pending: None,
            next_turn: 1,
        }
    }

    /// The conversation.
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The saved settings.
    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
        self.settings.current()
    }

    /// The settings form.
    #[must_use]
    pub const fn settings_form(&self) -> &SettingsForm {
        &self.settings_form
    }

    /// Mutable access to the settings form for editing the draft.
    pub fn settings_form_mut(&mut self) -> &mut SettingsForm {
        &mut self.settings_form
    }

    /// Open the settings form seeded with the saved settings.
    pub fn open_settings(&mut self) {
        self.settings_form.open(self.settings.current());
    }

    /// Save the form's draft.
    ///
    /// # Errors
    ///
    /// On a missing field the saved settings are unchanged and the form
    /// stays open.
    pub fn submit_settings(&mut self) -> Result<(), SettingsError> {
        self.settings_form.submit(&mut self.settings)
    }

    /// The latest analysis snapshot, if any.
    #[must_use]
    pub const fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// The turn awaiting a response, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingTurn> {
        self.pending.as_ref()
    }

    /// Returns true while a turn awaits its response (input disabled).
    #[must_use]
    pub const fn is_awaiting(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a turn.
    ///
    /// On success the user message and a typing placeholder have been
    /// appended and the returned [`PendingTurn`] says which endpoint to call.
    ///
    /// # Errors
    ///
    /// - [`TurnRejected::Empty`] for blank input, with no state change
    /// - [`TurnRejected::Busy`] while another turn is pending
    /// - [`TurnRejected::SettingsIncomplete`] if league id or username is
    ///   missing; the settings form is opened and nothing else changes
    pub fn begin_turn(
        &mut self,
        request: TurnRequest,
        classifier: &dyn IntentClassifier,
    ) -> Result<PendingTurn, TurnRejected> {
        let (kind, text, shown) = match request {
            TurnRequest::Message(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(TurnRejected::Empty);
                }
                let kind = TurnKind::from(classifier.classify(&text));
                (kind, text.clone(), text)
            }
            TurnRequest::Quick(action) => (
                TurnKind::AnalyzeTeam,
                action.prompt().to_string(),
                action.prompt().to_string(),
            ),
            TurnRequest::Trade(details) => {
                let details = details.trim().to_string();
                if details.is_empty() {
                    return Err(TurnRejected::Empty);
                }
                let shown = format!("Evaluate trade: {details}");
                (TurnKind::Trade, details, shown)
            }
        };

        if self.pending.is_some() {
            tracing::debug!("Turn rejected: previous turn still pending");
            return Err(TurnRejected::Busy);
        }

        if let Err(e) = self.settings.current().validate() {
            tracing::info!(error = %e, "Turn blocked until settings are complete");
            self.open_settings();
            return Err(TurnRejected::SettingsIncomplete(e));
        }

        let id = TurnId::new(self.next_turn);
        self.next_turn += 1;

        self.transcript.push(Message::user(shown));
        self.transcript.push(Message::typing(id));

        let turn = PendingTurn {
            id,
            kind,
            text,
            settings: self.settings.current().clone(),
        };
        tracing::debug!(turn = %id, kind = ?kind, "Turn started");
        self.pending = Some(turn.clone());
        Ok(turn)
    }

    /// Apply the outcome of a turn's network call.
    ///
    /// The placeholder is removed and exactly one bot message appended. A
    /// successful team analysis also replaces the analysis snapshot; every
    /// other outcome leaves it as it was.
    pub fn complete_turn(&mut self, turn: TurnId, outcome: TurnOutcome) -> Completion {
        if self.pending.as_ref().map(|p| p.id) != Some(turn) {
            tracing::warn!(turn = %turn, "Discarding stale turn completion");
            return Completion::Stale;
        }
        self.pending = None;
        self.transcript.remove_placeholder(turn);

        let content = match outcome {
            TurnOutcome::Analysis(result) => {
                let summary = analysis_summary(&result);
                self.analysis = Some(result);
                summary
            }
            TurnOutcome::Chat(reply) => reply.response,
            TurnOutcome::Trade(trade) => trade_summary(&trade),
            TurnOutcome::Failed(e) => {
                tracing::error!(turn = %turn, error = %e, "Turn failed");
                APOLOGY_TEXT.to_string()
            }
        };

        self.transcript.push(Message::bot(content));
        Completion::Applied
    }

    /// Clear the conversation and analysis; settings are kept.
    ///
    /// A turn still in flight becomes stale.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending.take() {
            tracing::info!(turn = %pending.id, "Reset with turn in flight");
        }
        self.transcript = Transcript::with_welcome();
        self.analysis = None;
    }
}

/// Transcript line for a completed team analysis.
#[must_use]
pub fn analysis_summary(result: &AnalysisResult) -> String {
    let headline = format!(
        "Team grade: {} | Brutality: {}/10",
        result.team_grade, result.brutality_score
    );
    if result.analysis.trim().is_empty() {
        headline
    } else {
        format!("{headline}\n\n{}", result.analysis.trim())
    }
}

/// Transcript text for a completed trade evaluation.
#[must_use]
pub fn trade_summary(trade: &TradeAnalysis) -> String {
    let headline = format!(
        "Trade verdict: {} | Impact: {:.1} | Confidence: {:.0}%",
        trade.trade_verdict,
        trade.impact_score,
        trade.confidence * 100.0
    );
    if trade.analysis.trim().is_empty() {
        headline
    } else {
        format!("{headline}\n\n{}", trade.analysis.trim())
    }
}
