//! Scripted terminal sessions against a mock backend.

use fantasy_advisor::chat::{ChatController, APOLOGY_TEXT};
use fantasy_advisor::cli::Repl;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{analysis_body, client_for};

async fn run(server: &MockServer, timeout_ms: u64, script: &str) -> String {
    let mut repl = Repl::new(ChatController::new(client_for(server, timeout_ms)));
    let mut out = Vec::new();
    repl.run(script.as_bytes(), &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn test_full_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/enhanced/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let script = "\
/set league 123
/set user bob
/save
/quick analyze
/panel
/trace
/health
/quit
";
    let out = run(&server, 5_000, script).await;

    assert!(out.contains("Settings saved."));
    assert!(out.contains("You: Analyze my current team and give me a grade"));
    assert!(out.contains("Advisor: Team grade: B+ | Brutality: 7/10"));
    assert!(out.contains("Grade: B+"));
    assert!(out.contains("[SLEEPER ✓]"));
    assert!(out.contains("▸ Execution trace (2 steps, 0 errors, 1.2s)"));
    assert!(out.contains("  ✓ grade_team"));
    assert!(out.contains("\"status\": \"healthy\""));
}

#[tokio::test]
async fn test_guarded_session_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let out = run(&server, 5_000, "analyze my team\n/roster\n").await;

    assert!(out.contains("please complete your settings"));
    assert!(out.contains("error: Settings error: Missing required setting: league_id"));
    assert!(out.contains("--- Settings ---"));
}

#[tokio::test]
async fn test_unreachable_backend_apologizes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let script = "/set league 123\n/set user bob\n/save\nwho do I start?\n";
    let out = run(&server, 5_000, script).await;

    assert_eq!(out.matches(APOLOGY_TEXT).count(), 1);
}
