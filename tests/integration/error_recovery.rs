//! Failure paths: every failed turn ends with exactly one apology.

use std::time::Duration;

use fantasy_advisor::chat::{Completion, TurnRejected, APOLOGY_TEXT};
use fantasy_advisor::error::{ApiError, AppError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{analysis_body, chat_body, client_for, configured_controller};

fn apology_count(messages: &[fantasy_advisor::chat::Message]) -> usize {
    messages.iter().filter(|m| m.content == APOLOGY_TEXT).count()
}

#[tokio::test]
async fn test_timeout_yields_single_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_body("too late"))
                .set_delay(Duration::from_millis(1_500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 200)).await;
    let status = controller.send_message("hello").await.unwrap();
    assert_eq!(status, Completion::Applied);

    let session = controller.session().await;
    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(apology_count(messages), 1);
    assert_eq!(messages[2].content, APOLOGY_TEXT);
    assert!(!session.is_awaiting());
}

#[tokio::test]
async fn test_server_error_yields_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller.send_message("grade my team").await.unwrap();

    let session = controller.session().await;
    assert_eq!(session.transcript().last().unwrap().content, APOLOGY_TEXT);
    assert!(session.analysis().is_none());
}

#[tokio::test]
async fn test_success_false_is_a_failure() {
    let server = MockServer::start().await;
    let mut body = analysis_body();
    body["success"] = serde_json::Value::Bool(false);
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller.send_message("analyze please").await.unwrap();

    let session = controller.session().await;
    assert_eq!(session.transcript().last().unwrap().content, APOLOGY_TEXT);
    assert!(session.analysis().is_none());
}

#[tokio::test]
async fn test_malformed_body_yields_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller.send_message("hello").await.unwrap();

    let session = controller.session().await;
    assert_eq!(apology_count(session.transcript().messages()), 1);
}

#[tokio::test]
async fn test_failure_keeps_previous_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analysis_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    controller.send_message("analyze my team").await.unwrap();
    controller.send_message("analyze my team again").await.unwrap();

    let session = controller.session().await;
    assert_eq!(session.transcript().last().unwrap().content, APOLOGY_TEXT);
    assert_eq!(session.analysis().unwrap().team_grade, "B+");
}

#[tokio::test]
async fn test_overlapping_turn_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_body("first answer"))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    let first = controller.send_message("first question");
    let second = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.send_message("second question").await
    };
    let (first, second) = tokio::join!(first, second);

    assert_eq!(first.unwrap(), Completion::Applied);
    assert_eq!(second.unwrap_err(), TurnRejected::Busy);

    let session = controller.session().await;
    let contents: Vec<&str> = session
        .transcript()
        .messages()
        .iter()
        .map(|m| m.content.as_str())
        .collect();
    assert!(contents.contains(&"first question"));
    assert!(!contents.contains(&"second question"));
    assert_eq!(contents.last(), Some(&"first answer"));
}

#[tokio::test]
async fn test_reset_drops_in_flight_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/analyze-team"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(analysis_body())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 5_000)).await;
    let turn = controller.send_message("analyze my team");
    let reset = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        controller.session().await.reset();
    };
    let (status, ()) = tokio::join!(turn, reset);

    assert_eq!(status.unwrap(), Completion::Stale);
    let session = controller.session().await;
    assert_eq!(session.transcript().len(), 1);
    assert!(session.analysis().is_none());
    assert_eq!(session.settings().username, "bob");
}

#[tokio::test]
async fn test_quick_info_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/enhanced/quick-analysis"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(1_500)))
        .mount(&server)
        .await;

    let controller = configured_controller(client_for(&server, 200)).await;
    let err = controller.quick_info("waiver_wire").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::Timeout { timeout_ms: 200 })
    ));
}
