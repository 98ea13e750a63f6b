//! Analysis API client.
//!
//! This module provides:
//! - [`AdvisorClient`]: reqwest client for the fantasy analysis backend
//! - Request/response payload types
//! - [`ClientConfig`]: base URL and timeout
//!
//! All endpoints live under the base URL's `/api` prefix. Every call is a
//! single JSON request/response bounded by one fixed timeout.

mod client;
mod config;
mod types;

pub use client::{endpoints, AdvisorClient};
pub use config::ClientConfig;
pub use types::{
    AnalysisResult, AnalyzeTeamRequest, AnalyzeTradeRequest, ApiPayload, ChatReply, ChatRequest,
    ExecutionSummary, QuickAnalysis, QuickAnalysisRequest, RosterRequest, TradeAnalysis,
};
