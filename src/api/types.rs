//! Request and response payloads for the analysis API.
//!
//! Field names follow the backend's JSON (snake case). Response types are
//! lenient: absent optional fields fall back to defaults so that a partial
//! payload still decodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn default_success() -> bool {
    true
}

// ============================================================================
// Requests
// ============================================================================

/// Body of `POST /enhanced/analyze-team`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeTeamRequest {
    /// Sleeper league id.
    pub league_id: String,
    /// Sleeper username.
    pub username: String,
    /// Free-text question.
    pub question: String,
    /// Brutal mode flag.
    pub brutality_mode: bool,
}

/// Body of `POST /enhanced/analyze-trade`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeTradeRequest {
    /// Sleeper league id.
    pub league_id: String,
    /// Sleeper username.
    pub username: String,
    /// Description of the proposed trade.
    pub trade_details: String,
}

/// Body of `POST /enhanced/quick-analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAnalysisRequest {
    /// Sleeper league id.
    pub league_id: String,
    /// Sleeper username.
    pub username: String,
    /// Kind of quick analysis requested.
    pub analysis_type: String,
}

/// Body of `POST /enhanced/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Sleeper league id.
    pub league_id: String,
    /// Sleeper username.
    pub username: String,
    /// User message.
    pub message: String,
}

/// Body of `POST /sleeper/user-roster`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRequest {
    /// Sleeper league id.
    pub league_id: String,
    /// Sleeper username.
    pub username: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Trace of the backend workflow that produced an analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Workflow steps that completed, in order.
    #[serde(default)]
    pub steps_completed: Vec<String>,
    /// Errors reported by the workflow, in order.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Total execution time in seconds.
    #[serde(default)]
    pub total_time: f64,
}

/// Full team analysis returned by `analyze-team`.
///
/// Treated as an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Application-level success flag.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Narrative analysis text.
    #[serde(default)]
    pub analysis: String,
    /// Letter grade (e.g. `B+`).
    pub team_grade: String,
    /// Brutality score, 0 to 10.
    pub brutality_score: u8,
    /// Ordered recommendations.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Confidence, 0 to 1.
    #[serde(default)]
    pub confidence_score: f64,
    /// Upstream provider availability, keyed by source name.
    #[serde(default)]
    pub data_sources: BTreeMap<String, bool>,
    /// Workflow trace.
    #[serde(default)]
    pub execution_summary: ExecutionSummary,
    /// Server timestamp (ISO 8601 text as sent).
    #[serde(default)]
    pub timestamp: String,
}

/// Trade evaluation returned by `analyze-trade`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeAnalysis {
    /// Application-level success flag.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Short verdict (e.g. `accept`, `decline`).
    pub trade_verdict: String,
    /// Narrative analysis text.
    #[serde(default)]
    pub analysis: String,
    /// Estimated impact of the trade.
    #[serde(default)]
    pub impact_score: f64,
    /// Confidence, 0 to 1.
    #[serde(default)]
    pub confidence: f64,
    /// Server timestamp.
    #[serde(default)]
    pub timestamp: String,
}

/// Result of `quick-analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAnalysis {
    /// Application-level success flag.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Short analysis text.
    pub quick_analysis: String,
    /// Bullet points.
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Result of `chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    /// Application-level success flag.
    #[serde(default = "default_success")]
    pub success: bool,
    /// Reply text.
    pub response: String,
    /// Backend label for the kind of question asked.
    #[serde(default = "ChatReply::default_analysis_type")]
    pub analysis_type: String,
    /// Confidence, 0 to 1.
    #[serde(default)]
    pub confidence: f64,
}

impl ChatReply {
    fn default_analysis_type() -> String {
        "chat".to_string()
    }
}

/// Payloads that carry an application-level `success` flag.
pub trait ApiPayload {
    /// Returns the payload's own success flag.
    fn succeeded(&self) -> bool;
}

impl ApiPayload for AnalysisResult {
    fn succeeded(&self) -> bool {
        self.success
    }
}

impl ApiPayload for TradeAnalysis {
    fn succeeded(&self) -> bool {
        self.success
    }
}

impl ApiPayload for QuickAnalysis {
    fn succeeded(&self) -> bool {
        self.success
    }
}

impl ApiPayload for ChatReply {
    fn succeeded(&self) -> bool {
        self.success
    }
}
