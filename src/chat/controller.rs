//! Turn dispatch between the session and the analysis API.
//!
//! The controller owns the [`ChatSession`] behind an async mutex. The lock
//! is held only while a transition runs, never across the network call, so
//! a second turn started while one is in flight sees
//! [`TurnRejected::Busy`] instead of blocking.

use serde_json::Value;
use tokio::sync::{Mutex, MutexGuard};

use crate::api::{
    AnalyzeTeamRequest, AnalyzeTradeRequest, ChatRequest, QuickAnalysis, QuickAnalysisRequest,
    RosterRequest,
};
use crate::error::{ApiError, AppError};
use crate::traits::{AdvisorApi, IntentClassifier};

use super::classifier::KeywordClassifier;
use super::quick::QuickAction;
use super::session::{
    ChatSession, Completion, PendingTurn, TurnKind, TurnOutcome, TurnRejected, TurnRequest,
};

/// Drives chat turns against an [`AdvisorApi`].
pub struct ChatController<C> {
    client: C,
    classifier: Box<dyn IntentClassifier>,
    session: Mutex<ChatSession>,
}

impl<C: AdvisorApi> ChatController<C> {
    /// Create a controller with the keyword classifier and a fresh session.
    pub fn new(client: C) -> Self {
        Self::with_classifier(client, Box::new(KeywordClassifier::default()))
    }

    /// Create a controller with a custom classifier.
    pub fn with_classifier(client: C, classifier: Box<dyn IntentClassifier>) -> Self {
        Self {
            client,
            classifier,
            session: Mutex::new(ChatSession::new()),
        }
    }

    /// Lock the session for reading or editing settings.
    pub async fn session(&self) -> MutexGuard<'_, ChatSession> {
        self.session.lock().await
    }

    /// Send a free-text message.
    ///
    /// # Errors
    ///
    /// Returns [`TurnRejected`] if the turn could not start; API failures
    /// are not errors here, they end the turn with an apology message.
    pub async fn send_message(&self, text: &str) -> Result<Completion, TurnRejected> {
        self.run_turn(TurnRequest::Message(text.to_string())).await
    }

    /// Trigger a quick action.
    ///
    /// # Errors
    ///
    /// See [`ChatController::send_message`].
    pub async fn quick_action(&self, action: QuickAction) -> Result<Completion, TurnRejected> {
        self.run_turn(TurnRequest::Quick(action)).await
    }

    /// Ask for a trade evaluation.
    ///
    /// # Errors
    ///
    /// See [`ChatController::send_message`].
    pub async fn evaluate_trade(&self, details: &str) -> Result<Completion, TurnRejected> {
        self.run_turn(TurnRequest::Trade(details.to_string())).await
    }

    /// Run one turn: begin, call the API, complete.
    ///
    /// # Errors
    ///
    /// See [`ChatController::send_message`].
    pub async fn run_turn(&self, request: TurnRequest) -> Result<Completion, TurnRejected> {
        let turn = {
            let mut session = self.session.lock().await;
            session.begin_turn(request, self.classifier.as_ref())?
        };

        let id = turn.id;
        let outcome = self.dispatch(turn).await;

        let mut session = self.session.lock().await;
        Ok(session.complete_turn(id, outcome))
    }

    async fn dispatch(&self, turn: PendingTurn) -> TurnOutcome {
        let PendingTurn {
            kind,
            text,
            settings,
            ..
        } = turn;

        let result = match kind {
            TurnKind::AnalyzeTeam => self
                .client
                .analyze_team(AnalyzeTeamRequest {
                    league_id: settings.league_id,
                    username: settings.username,
                    question: text,
                    brutality_mode: settings.brutal_mode,
                })
                .await
                .map(TurnOutcome::Analysis),
            TurnKind::Chat => self
                .client
                .chat(ChatRequest {
                    league_id: settings.league_id,
                    username: settings.username,
                    message: text,
                })
                .await
                .map(TurnOutcome::Chat),
            TurnKind::Trade => self
                .client
                .analyze_trade(AnalyzeTradeRequest {
                    league_id: settings.league_id,
                    username: settings.username,
                    trade_details: text,
                })
                .await
                .map(TurnOutcome::Trade),
        };

        result.unwrap_or_else(TurnOutcome::Failed)
    }

    /// Fetch a quick analysis outside the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Settings`] if settings are incomplete (the form
    /// is opened) or [`AppError::Api`] if the call fails.
    pub async fn quick_info(&self, analysis_type: &str) -> Result<QuickAnalysis, AppError> {
        let settings = self.ready_settings().await?;
        let analysis = self
            .client
            .quick_analysis(QuickAnalysisRequest {
                league_id: settings.league_id,
                username: settings.username,
                analysis_type: analysis_type.to_string(),
            })
            .await?;
        Ok(analysis)
    }

    /// Fetch league info for the configured league.
    ///
    /// # Errors
    ///
    /// See [`ChatController::quick_info`].
    pub async fn league_info(&self) -> Result<Value, AppError> {
        let settings = self.ready_settings().await?;
        Ok(self.client.league_info(settings.league_id).await?)
    }

    /// Fetch the roster of the configured user.
    ///
    /// # Errors
    ///
    /// See [`ChatController::quick_info`].
    pub async fn user_roster(&self) -> Result<Value, AppError> {
        let settings = self.ready_settings().await?;
        Ok(self
            .client
            .user_roster(RosterRequest {
                league_id: settings.league_id,
                username: settings.username,
            })
            .await?)
    }

    /// Backend health.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.client.health_check().await
    }

    /// Backend workflow status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn workflow_status(&self) -> Result<Value, ApiError> {
        self.client.workflow_status().await
    }

    /// LLMs available to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the call fails.
    pub async fn available_llms(&self) -> Result<Value, ApiError> {
        self.client.available_llms().await
    }

    async fn ready_settings(&self) -> Result<crate::settings::UserSettings, AppError> {
        let mut session = self.session.lock().await;
        if let Err(e) = session.settings().validate() {
            session.open_settings();
            return Err(e.into());
        }
        Ok(session.settings().clone())
    }
}

impl<C> std::fmt::Debug for ChatController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatController").finish_non_exhaustive()
    }
}
