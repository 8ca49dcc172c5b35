//! Common test utilities for integration tests.

#![allow(dead_code)]

use results_bot::commands::{CommandRegistry, EventHandler, TeamHandler};
use results_bot::worker::ResultWorker;
use slack_responder::SlackResponder;
use std::sync::Arc;
use std::time::Duration;
use wiremock::MockServer;
use zwiftpower_client::ZwiftPowerClient;

pub const TEAM_ID: &str = "4242";
pub const TEAM_NAME: &str = "Dropouts";

/// Create a ZwiftPower client configured for a mock server.
pub fn test_zwiftpower_client(base_url: &str) -> Arc<ZwiftPowerClient> {
    Arc::new(ZwiftPowerClient::new(base_url, Duration::from_secs(5)).unwrap())
}

/// The registry the binary builds, pointed at `base_url`.
pub fn test_registry(base_url: &str) -> Arc<CommandRegistry> {
    let zwiftpower = test_zwiftpower_client(base_url);
    Arc::new(
        CommandRegistry::new()
            .register(Box::new(EventHandler::new(zwiftpower.clone(), TEAM_NAME)))
            .register(Box::new(TeamHandler::new(zwiftpower, TEAM_ID, TEAM_NAME))),
    )
}

/// A worker fetching from the ZwiftPower mock.
pub fn test_worker(zwiftpower_server: &MockServer) -> ResultWorker {
    ResultWorker::new(
        test_registry(&zwiftpower_server.uri()),
        Arc::new(SlackResponder::new(Duration::from_secs(5)).unwrap()),
    )
}

/// Callback URL served by the Slack mock.
pub fn callback_url(slack_server: &MockServer) -> String {
    format!("{}/commands/T1/2/abc", slack_server.uri())
}
