//! Successful turns from input to transcript and panel.

use fantasy_advisor::chat::{Completion, QuickAction, Sender};
use fantasy_advisor::panel::AnalysisPanel;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{analysis_body, chat_body, client_for, configured_controller};

#[tokio::test]
async fn test_team_analysis_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .and(body_partial_json(json!({
            "league_id": "123",
            "username": "bob",
            "question": "Analyze my team",
            "brutality_mode": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    let status = controller.send_message("Analyze my team").await.unwrap();
    assert_eq!(status, Completion::Applied);

    let session = controller.session().await;
    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].content, "Analyze my team");

    let reply = &messages[2];
    assert_eq!(reply.sender, Sender::Bot);
    assert!(reply.content.contains("B+"));
    assert!(reply.content.contains("7/10"));
    assert!(session.transcript().placeholder().is_none());

    let panel = AnalysisPanel::new(session.analysis()).to_string();
    assert!(panel.contains("Grade: B+"));
    assert!(panel.contains("Brutality: 7/10"));
    assert!(panel.contains("1. Bench player X"));
    assert!(panel.contains("SLEEPER ✓"));
    assert!(panel.contains("INJURY REPORTS ✗"));
}

#[tokio::test]
async fn test_minimal_payload_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .and(body_partial_json(json!({
            "league_id": "123",
            "username": "bob",
            "question": "Analyze my current team and give me a grade"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "team_grade": "B+",
            "brutality_score": 7,
            "recommendations": ["Bench player X"],
            "confidence_score": 0.8,
            "data_sources": {"sleeper": true},
            "execution_summary": {"steps_completed": [], "errors": [], "total_time": 1.2},
            "timestamp": "2024-10-01T12:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    let status = controller
        .send_message("Analyze my current team and give me a grade")
        .await
        .unwrap();
    assert_eq!(status, Completion::Applied);

    let session = controller.session().await;
    let reply = &session.transcript().last().unwrap().content;
    assert_eq!(reply, "Team grade: B+ | Brutality: 7/10");

    let panel = AnalysisPanel::new(session.analysis()).to_string();
    assert!(panel.contains("Grade: B+"));
    assert!(panel.contains("Brutality: 7/10"));
    assert!(panel.contains("1. Bench player X"));
    assert!(panel.contains("SLEEPER ✓"));
}

#[tokio::test]
async fn test_chat_roundtrip_leaves_panel_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/chat"))
        .and(body_partial_json(json!({"message": "Who should I start at flex?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Start Puka.")))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller
        .send_message("Who should I start at flex?")
        .await
        .unwrap();

    let session = controller.session().await;
    assert_eq!(session.transcript().last().unwrap().content, "Start Puka.");
    assert!(session.analysis().is_none());
}

#[tokio::test]
async fn test_quick_action_then_chat_keeps_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .and(body_partial_json(json!({"question": QuickAction::WaiverTargets.prompt()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Sure.")))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller
        .quick_action(QuickAction::WaiverTargets)
        .await
        .unwrap();
    controller.send_message("thanks!").await.unwrap();

    let session = controller.session().await;
    assert_eq!(session.analysis().unwrap().team_grade, "B+");
    assert_eq!(session.transcript().len(), 5);
}

#[tokio::test]
async fn test_trade_roundtrip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-trade"))
        .and(body_partial_json(json!({"trade_details": "my WR1 for their RB1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "trade_verdict": "accept",
            "analysis": "You win this one.",
            "impact_score": 3.5,
            "confidence": 0.75,
            "timestamp": "2024-10-01T12:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller
        .evaluate_trade("my WR1 for their RB1")
        .await
        .unwrap();

    let session = controller.session().await;
    let reply = &session.transcript().last().unwrap().content;
    assert!(reply.starts_with("Trade verdict: accept | Impact: 3.5 | Confidence: 75%"));
    assert!(reply.contains("You win this one."));
}

#[tokio::test]
async fn test_lookups_use_saved_settings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sleeper/league/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Dynasty"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/sleeper/user-roster"))
        .and(body_partial_json(json!({"league_id": "123", "username": "bob"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"players": ["p1"]})))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    assert_eq!(controller.league_info().await.unwrap()["name"], "Dynasty");
    assert_eq!(controller.user_roster().await.unwrap()["players"][0], "p1");
}
