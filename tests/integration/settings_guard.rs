//! No request leaves the client until league id and username are saved.

use fantasy_advisor::chat::{ChatController, QuickAction, TurnRejected};
use fantasy_advisor::error::{AppError, SettingsError};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::client_for;

async fn silent_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_turns_blocked_without_settings() {
    let server = silent_server().await;
    let controller = ChatController::new(client_for(&server, 5_000));

    let err = controller.send_message("analyze my team").await.unwrap_err();
    assert_eq!(
        err,
        TurnRejected::SettingsIncomplete(SettingsError::MissingField {
            field: "league_id".to_string()
        })
    );
    assert!(matches!(
        controller.quick_action(QuickAction::TradeTargets).await,
        Err(TurnRejected::SettingsIncomplete(_))
    ));
    assert!(matches!(
        controller.evaluate_trade("WR1 for RB1").await,
        Err(TurnRejected::SettingsIncomplete(_))
    ));
    assert!(matches!(
        controller.league_info().await,
        Err(AppError::Settings(_))
    ));

    let session = controller.session().await;
    assert!(session.settings_form().is_open());
    assert_eq!(session.transcript().len(), 1);
}

#[tokio::test]
async fn test_empty_username_keeps_form_open() {
    let server = silent_server().await;
    let controller = ChatController::new(client_for(&server, 5_000));

    {
        let mut session = controller.session().await;
        session.open_settings();
        let form = session.settings_form_mut();
        form.set_league_id("123");
        form.set_username("   ");
        let err = session.submit_settings().unwrap_err();
        assert_eq!(
            err,
            SettingsError::MissingField {
                field: "username".to_string()
            }
        );
        assert!(session.settings_form().is_open());
        assert_eq!(session.settings().league_id, "");
    }

    assert!(matches!(
        controller.send_message("hello").await,
        Err(TurnRejected::SettingsIncomplete(_))
    ));
}

#[tokio::test]
async fn test_empty_message_is_ignored() {
    let server = silent_server().await;
    let controller = ChatController::new(client_for(&server, 5_000));

    assert_eq!(
        controller.send_message("   ").await.unwrap_err(),
        TurnRejected::Empty
    );
    assert!(!controller.session().await.settings_form().is_open());
}
