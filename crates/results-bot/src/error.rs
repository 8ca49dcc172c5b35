//! Application error types.

use crate::api::SlashCommandResponse;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// Shown to the user when the webhook could not be accepted.
pub const FRAMEWORK_ERROR: &str = "Oops, something went wrong with the slack framework.";

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("ZwiftPower error: {0}")]
    ZwiftPower(#[from] zwiftpower_client::ZwiftPowerError),

    #[error("Slack error: {0}")]
    Slack(#[from] slack_responder::SlackError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;

/// Reasons a slash command webhook is not queued.
#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("Malformed slash command payload: {0}")]
    Malformed(String),

    #[error("Missing form field: {0}")]
    MissingField(&'static str),

    #[error("Work queue unavailable: {0}")]
    Queue(String),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        error!("Slash command rejected: {}", self);

        // Slack only renders the body of a 200 response
        (
            StatusCode::OK,
            Json(SlashCommandResponse::ephemeral(FRAMEWORK_ERROR)),
        )
            .into_response()
    }
}
