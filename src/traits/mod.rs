//! Trait definitions for mockable dependencies.
//!
//! This module defines:
//! - [`AdvisorApi`]: analysis API abstraction
//! - [`IntentClassifier`]: routing of free text to an endpoint
//!
//! # Mocking
//!
//! [`AdvisorApi`] is annotated with `#[cfg_attr(test, mockall::automock)]`
//! which generates `MockAdvisorApi` for unit tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::api::{
    AnalysisResult, AnalyzeTeamRequest, AnalyzeTradeRequest, ChatReply, ChatRequest,
    QuickAnalysis, QuickAnalysisRequest, RosterRequest, TradeAnalysis,
};
use crate::chat::Route;
use crate::error::ApiError;

/// Analysis API trait for mocking.
///
/// Every method is a single request/response pair with no retry. Payloads
/// that report `success: false` come back as [`ApiError::Rejected`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdvisorApi: Send + Sync {
    /// Full team analysis.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on timeout, transport failure, non-2xx status,
    /// undecodable body or `success: false`.
    async fn analyze_team(&self, request: AnalyzeTeamRequest) -> Result<AnalysisResult, ApiError>;

    /// Trade evaluation.
    ///
    /// # Errors
    ///
    /// See [`AdvisorApi::analyze_team`].
    async fn analyze_trade(&self, request: AnalyzeTradeRequest)
        -> Result<TradeAnalysis, ApiError>;

    /// Short analysis of one aspect of the team.
    ///
    /// # Errors
    ///
    /// See [`AdvisorApi::analyze_team`].
    async fn quick_analysis(
        &self,
        request: QuickAnalysisRequest,
    ) -> Result<QuickAnalysis, ApiError>;

    /// Free-form chat.
    ///
    /// # Errors
    ///
    /// See [`AdvisorApi::analyze_team`].
    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ApiError>;

    /// Backend workflow status (opaque).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or decoding failure.
    async fn workflow_status(&self) -> Result<Value, ApiError>;

    /// LLM providers available to the backend (opaque).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or decoding failure.
    async fn available_llms(&self) -> Result<Value, ApiError>;

    /// Backend health probe (opaque).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or decoding failure.
    async fn health_check(&self) -> Result<Value, ApiError>;

    /// Sleeper league information (opaque).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or decoding failure.
    async fn league_info(&self, league_id: String) -> Result<Value, ApiError>;

    /// Sleeper roster for a user in a league (opaque).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any transport or decoding failure.
    async fn user_roster(&self, request: RosterRequest) -> Result<Value, ApiError>;
}

/// Decides which endpoint a free-text message goes to.
///
/// Quick actions bypass the classifier entirely.
pub trait IntentClassifier: Send + Sync {
    /// Classify a message.
    fn classify(&self, text: &str) -> Route;
}

impl<F> IntentClassifier for F
where
    F: Fn(&str) -> Route + Send + Sync,
{
    fn classify(&self, text: &str) -> Route {
        self(text)
    }
}
