//! Fantasy Advisor binary entry point.
//!
//! Runs the chat REPL on stdin/stdout. Logs go to stderr so they do not
//! interleave with the conversation.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use fantasy_advisor::api::{AdvisorClient, ClientConfig};
use fantasy_advisor::chat::ChatController;
use fantasy_advisor::cli::Repl;
use fantasy_advisor::config::Config;
use tokio::io::BufReader;

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("fantasy-advisor starting...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Configuration loaded: api_url={}, timeout={}ms",
        config.api_url,
        config.request_timeout_ms
    );

    let client = match AdvisorClient::new(ClientConfig::from(&config)) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Client error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(base_url = client.base_url(), "Analysis API client ready");

    let mut repl = Repl::new(ChatController::new(client));
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    if let Err(e) = repl.run(stdin, &mut stdout).await {
        tracing::error!("REPL error: {e}");
        std::process::exit(1);
    }

    tracing::info!("fantasy-advisor shutdown complete");
}
