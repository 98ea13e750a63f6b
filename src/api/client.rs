//! Analysis API client.
//!
//! This module provides:
//! - HTTP client for the `/enhanced` and `/sleeper` endpoints
//! - A single fixed timeout per request, no retry
//! - Uniform error mapping into [`ApiError`]

#![allow(clippy::missing_errors_doc)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::config::ClientConfig;
use super::types::{
    AnalysisResult, AnalyzeTeamRequest, AnalyzeTradeRequest, ApiPayload, ChatReply, ChatRequest,
    QuickAnalysis, QuickAnalysisRequest, RosterRequest, TradeAnalysis,
};
use crate::error::ApiError;
use crate::traits::AdvisorApi;

/// Endpoint paths, relative to the base URL.
pub mod endpoints {
    /// Full team analysis.
    pub const ANALYZE_TEAM: &str = "/enhanced/analyze-team";
    /// Trade evaluation.
    pub const ANALYZE_TRADE: &str = "/enhanced/analyze-trade";
    /// Quick analysis.
    pub const QUICK_ANALYSIS: &str = "/enhanced/quick-analysis";
    /// Free-form chat.
    pub const CHAT: &str = "/enhanced/chat";
    /// Workflow status.
    pub const WORKFLOW_STATUS: &str = "/enhanced/workflow-status";
    /// Available LLMs.
    pub const AVAILABLE_LLMS: &str = "/enhanced/available-llms";
    /// Health probe.
    pub const HEALTH: &str = "/enhanced/health";
    /// League info prefix; the league id is appended.
    pub const SLEEPER_LEAGUE: &str = "/sleeper/league";
    /// User roster.
    pub const SLEEPER_USER_ROSTER: &str = "/sleeper/user-roster";
}

/// Analysis API client.
#[derive(Debug, Clone)]
pub struct AdvisorClient {
    client: Client,
    config: ClientConfig,
}

impl AdvisorClient {
    /// Create a new client.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ApiError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self { client, config })
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = self
            .client
            .get(self.url(path))
            .header(CONTENT_TYPE, "application/json");
        self.execute(path, request).await
    }

    async fn post<B: Serialize + Sync, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        // json() leaves an existing content-type in place.
        let request = self
            .client
            .post(self.url(path))
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        self.execute(path, request).await
    }

    /// Send a request and decode the JSON body.
    async fn execute<R: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<R, ApiError> {
        let start = Instant::now();
        tracing::debug!(
            endpoint = path,
            timeout_ms = self.config.timeout_ms,
            "Sending analysis API request"
        );

        let response = request
            .send()
            .await
            .map_err(|e| {
                let elapsed_ms = elapsed_ms(start);
                if e.is_timeout() {
                    tracing::error!(
                        endpoint = path,
                        elapsed_ms,
                        timeout_ms = self.config.timeout_ms,
                        "Analysis API request timed out"
                    );
                    ApiError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    tracing::error!(endpoint = path, elapsed_ms, error = %e, "Analysis API request failed");
                    ApiError::Network {
                        message: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        tracing::debug!(
            endpoint = path,
            status = %status,
            elapsed_ms = elapsed_ms(start),
            "Analysis API response received"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint = path, status = status.as_u16(), body = %body, "Non-success status");
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    timeout_ms: self.config.timeout_ms,
                }
            } else {
                tracing::error!(endpoint = path, error = %e, "Failed to decode response");
                ApiError::Decode {
                    message: e.to_string(),
                }
            }
        })
    }
}

/// Turn a `success: false` payload into an error.
fn ensure_success<P: ApiPayload>(endpoint: &str, payload: P) -> Result<P, ApiError> {
    if payload.succeeded() {
        Ok(payload)
    } else {
        tracing::warn!(endpoint, "Payload reported success=false");
        Err(ApiError::Rejected {
            endpoint: endpoint.to_string(),
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

// ============================================================================
// AdvisorApi implementations
// ============================================================================

#[async_trait]
impl AdvisorApi for AdvisorClient {
    async fn analyze_team(&self, request: AnalyzeTeamRequest) -> Result<AnalysisResult, ApiError> {
        let result = self.post(endpoints::ANALYZE_TEAM, &request).await?;
        ensure_success(endpoints::ANALYZE_TEAM, result)
    }

    async fn analyze_trade(
        &self,
        request: AnalyzeTradeRequest,
    ) -> Result<TradeAnalysis, ApiError> {
        let result = self.post(endpoints::ANALYZE_TRADE, &request).await?;
        ensure_success(endpoints::ANALYZE_TRADE, result)
    }

    async fn quick_analysis(
        &self,
        request: QuickAnalysisRequest,
    ) -> Result<QuickAnalysis, ApiError> {
        let result = self.post(endpoints::QUICK_ANALYSIS, &request).await?;
        ensure_success(endpoints::QUICK_ANALYSIS, result)
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        let result = self.post(endpoints::CHAT, &request).await?;
        ensure_success(endpoints::CHAT, result)
    }

    async fn workflow_status(&self) -> Result<Value, ApiError> {
        self.get(endpoints::WORKFLOW_STATUS).await
    }

    async fn available_llms(&self) -> Result<Value, ApiError> {
        self.get(endpoints::AVAILABLE_LLMS).await
    }

    async fn health_check(&self) -> Result<Value, ApiError> {
        self.get(endpoints::HEALTH).await
    }

    async fn league_info(&self, league_id: String) -> Result<Value, ApiError> {
        let path = format!(
            "{}/{}",
            endpoints::SLEEPER_LEAGUE,
            urlencoding::encode(&league_id)
        );
        self.get(&path).await
    }

    async fn user_roster(&self, request: RosterRequest) -> Result<Value, ApiError> {
        self.post(endpoints::SLEEPER_USER_ROSTER, &request).await
    }
}

/// Blanket implementation for `Arc<AdvisorClient>`.
#[async_trait]
impl AdvisorApi for Arc<AdvisorClient> {
    async fn analyze_team(&self, request: AnalyzeTeamRequest) -> Result<AnalysisResult, ApiError> {
        self.as_ref().analyze_team(request).await
    }

    async fn analyze_trade(
        &self,
        request: AnalyzeTradeRequest,
    ) -> Result<TradeAnalysis, ApiError> {
        self.as_ref().analyze_trade(request).await
    }

    async fn quick_analysis(
        &self,
        request: QuickAnalysisRequest,
    ) -> Result<QuickAnalysis, ApiError> {
        self.as_ref().quick_analysis(request).await
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatReply, ApiError> {
        self.as_ref().chat(request).await
    }

    async fn workflow_status(&self) -> Result<Value, ApiError> {
        self.as_ref().workflow_status().await
    }

    async fn available_llms(&self) -> Result<Value, ApiError> {
        self.as_ref().available_llms().await
    }

    async fn health_check(&self) -> Result<Value, ApiError> {
        self.as_ref().health_check().await
    }

    async fn league_info(&self, league_id: String) -> Result<Value, ApiError> {
        self.as_ref().league_info(league_id).await
    }

    async fn user_roster(&self, request: RosterRequest) -> Result<Value, ApiError> {
        self.as_ref().user_roster(request).await
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp
)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_mock_client(server: &MockServer) -> AdvisorClient {
        let config = ClientConfig::default()
            .with_base_url(format!("{}/api", server.uri()))
            .with_timeout_ms(2_000);
        AdvisorClient::new(config).unwrap()
    }

    fn analysis_body() -> Value {
        json!({
            "success": true,
            "analysis": "Your WR room is thin.",
            "team_grade": "B+",
            "brutality_score": 7,
            "recommendations": ["Bench player X"],
            "confidence_score": 0.8,
            "data_sources": {"sleeper": true},
            "execution_summary": {"steps_completed": ["fetch_roster"], "errors": [], "total_time": 1.2},
            "timestamp": "2024-10-01T12:00:00"
        })
    }

    fn team_request() -> AnalyzeTeamRequest {
        AnalyzeTeamRequest {
            league_id: "123".to_string(),
            username: "bob".to_string(),
            question: "Analyze my team".to_string(),
            brutality_mode: true,
        }
    }

    #[test]
    fn test_client_new() {
        let client = AdvisorClient::new(ClientConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[tokio::test]
    async fn test_analyze_team_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/enhanced/analyze-team"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "league_id": "123",
                "username": "bob",
                "question": "Analyze my team",
                "brutality_mode": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let result = client.analyze_team(team_request()).await.unwrap();

        assert_eq!(result.team_grade, "B+");
        assert_eq!(result.brutality_score, 7);
        assert_eq!(result.confidence_score, 0.8);
    }

    #[tokio::test]
    async fn test_post_sends_single_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"players": []})))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        client
            .user_roster(RosterRequest {
                league_id: "123".to_string(),
                username: "bob".to_string(),
            })
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let values: Vec<&str> = requests[0]
            .headers
            .get_all("content-type")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, vec!["application/json"]);
    }

    #[tokio::test]
    async fn test_chat_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/enhanced/chat"))
            .and(body_json(json!({"league_id": "123", "username": "bob", "message": "Who do I start?"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "response": "Start your RB2.",
                "analysis_type": "start_sit",
                "confidence": 0.8
            })))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let reply = client
            .chat(ChatRequest {
                league_id: "123".to_string(),
                username: "bob".to_string(),
                message: "Who do I start?".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(reply.response, "Start your RB2.");
        assert_eq!(reply.analysis_type, "start_sit");
    }

    #[tokio::test]
    async fn test_success_false_is_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/enhanced/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": false, "response": "failed"})),
            )
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client
            .chat(ChatRequest {
                league_id: "1".to_string(),
                username: "u".to_string(),
                message: "hi".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Rejected {
                endpoint: "/enhanced/chat".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/enhanced/analyze-team"))
            .respond_with(ResponseTemplate::new(404).set_body_string("User not found on Sleeper"))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client.analyze_team(team_request()).await.unwrap_err();

        match err {
            ApiError::HttpStatus { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "User not found on Sleeper");
            }
            e => panic!("Wrong error type: {e:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_retry_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/enhanced/analyze-team"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let result = client.analyze_team(team_request()).await;
        assert!(matches!(result, Err(ApiError::HttpStatus { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/enhanced/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "healthy"}))
                    .set_delay(Duration::from_millis(1_500)),
            )
            .mount(&server)
            .await;

        let config = ClientConfig::default()
            .with_base_url(format!("{}/api", server.uri()))
            .with_timeout_ms(200);
        let client = AdvisorClient::new(config).unwrap();

        let err = client.health_check().await.unwrap_err();
        assert_eq!(err, ApiError::Timeout { timeout_ms: 200 });
    }

    #[tokio::test]
    async fn test_network_error() {
        // Nothing listens on port 9 locally.
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:9/api")
            .with_timeout_ms(2_000);
        let client = AdvisorClient::new(config).unwrap();

        let err = client.health_check().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/enhanced/analyze-team"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let err = client.analyze_team(team_request()).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_opaque_get_endpoints() {
        let server = MockServer::start().await;

        for (route, body) in [
            ("/api/enhanced/health", json!({"status": "healthy"})),
            ("/api/enhanced/workflow-status", json!({"workflow": "idle"})),
            ("/api/enhanced/available-llms", json!({"llms": ["gpt-4"]})),
        ] {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .mount(&server)
                .await;
        }

        let client = create_mock_client(&server);
        assert_eq!(client.health_check().await.unwrap()["status"], "healthy");
        assert_eq!(client.workflow_status().await.unwrap()["workflow"], "idle");
        assert_eq!(client.available_llms().await.unwrap()["llms"][0], "gpt-4");
    }

    #[tokio::test]
    async fn test_league_info_encodes_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/sleeper/league/12%2034"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Dynasty"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = create_mock_client(&server);
        let info = client.league_info("12 34".to_string()).await.unwrap();
        assert_eq!(info["name"], "Dynasty");
    }

    #[tokio::test]
    async fn test_user_roster_and_trade_and_quick() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/sleeper/user-roster"))
            .and(body_json(json!({"league_id": "123", "username": "bob"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"players": ["4046"]})))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/enhanced/analyze-trade"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "trade_verdict": "accept",
                "analysis": "You win this deal.",
                "impact_score": 6.5,
                "confidence": 0.7,
                "timestamp": "2024-10-01T12:00:00"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/enhanced/quick-analysis"))
            .and(body_json(json!({"league_id": "123", "username": "bob", "analysis_type": "waiver_wire"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "quick_analysis": "Grab a TE.",
                "key_points": ["TE is your weakest slot"]
            })))
            .mount(&server)
            .await;

        let client = Arc::new(create_mock_client(&server));

        let roster = client
            .user_roster(RosterRequest {
                league_id: "123".to_string(),
                username: "bob".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(roster["players"][0], "4046");

        let trade = client
            .analyze_trade(AnalyzeTradeRequest {
                league_id: "123".to_string(),
                username: "bob".to_string(),
                trade_details: "My WR1 for their RB1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(trade.trade_verdict, "accept");
        assert_eq!(trade.impact_score, 6.5);

        let quick = client
            .quick_analysis(QuickAnalysisRequest {
                league_id: "123".to_string(),
                username: "bob".to_string(),
                analysis_type: "waiver_wire".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(quick.key_points.len(), 1);
    }
}
