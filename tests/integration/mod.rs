//! Integration tests for the fantasy advisor chat client.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod chat_roundtrip;
mod error_recovery;
mod repl_session;
mod settings_guard;

use fantasy_advisor::api::{AdvisorClient, ClientConfig};
use fantasy_advisor::chat::ChatController;
use serde_json::{json, Value};
use wiremock::MockServer;

/// Client pointed at the mock server's `/api` prefix.
pub fn client_for(server: &MockServer, timeout_ms: u64) -> AdvisorClient {
    let config = ClientConfig::default()
        .with_base_url(format!("{}/api", server.uri()))
        .with_timeout_ms(timeout_ms);
    AdvisorClient::new(config).expect("client should build")
}

/// Controller with league `123` and user `bob` saved.
pub async fn configured_controller(client: AdvisorClient) -> ChatController<AdvisorClient> {
    let controller = ChatController::new(client);
    {
        let mut session = controller.session().await;
        session.open_settings();
        let form = session.settings_form_mut();
        form.set_league_id("123");
        form.set_username("bob");
        session.submit_settings().expect("settings should save");
    }
    controller
}

/// A successful team analysis payload.
pub fn analysis_body() -> Value {
    json!({
        "success": true,
        "analysis": "Your WR room is thin.",
        "team_grade": "B+",
        "brutality_score": 7,
        "recommendations": ["Bench player X"],
        "confidence_score": 0.8,
        "data_sources": {"sleeper": true, "injury_reports": false},
        "execution_summary": {
            "steps_completed": ["fetch_roster", "grade_team"],
            "errors": [],
            "total_time": 1.2
        },
        "timestamp": "2024-10-01T12:00:00"
    })
}

/// A successful chat payload.
pub fn chat_body(response: &str) -> Value {
    json!({
        "success": true,
        "response": response,
        "analysis_type": "chat",
        "confidence": 0.7
    })
}
