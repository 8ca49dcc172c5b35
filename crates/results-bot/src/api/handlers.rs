//! HTTP request handlers.

use super::types::{HealthResponse, SlashCommandResponse};
use super::AppState;
use crate::error::WebhookError;
use crate::worker::CommandRequest;
use axum::{
    extract::{rejection::FormRejection, State},
    Form, Json,
};
use std::collections::HashMap;
use tracing::{debug, info};

/// Immediate acknowledgement once a command is queued.
pub const RETRIEVING_RESULTS: &str = "Retrieving Results...";

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        commands: state.registry.len(),
    })
}

/// Accept a slash command and queue it for the worker.
///
/// Unknown commands are answered straight away and never queued.
pub async fn slash_command(
    State(state): State<AppState>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Result<Json<SlashCommandResponse>, WebhookError> {
    let Form(fields) = form.map_err(|e| WebhookError::Malformed(e.body_text()))?;
    let request = into_command_request(fields)?;
    debug!(?request, "Slash command received");

    if !state.registry.recognizes(&request.text) {
        info!(text = %request.text, "Rejecting unknown command");
        return Ok(Json(SlashCommandResponse::ephemeral(
            state.registry.not_understood(&request.text),
        )));
    }

    state
        .queue
        .try_send(request)
        .map_err(|e| WebhookError::Queue(e.to_string()))?;

    info!("Command queued");
    Ok(Json(SlashCommandResponse::ephemeral(RETRIEVING_RESULTS)))
}

fn into_command_request(
    mut fields: HashMap<String, String>,
) -> Result<CommandRequest, WebhookError> {
    let text = fields
        .remove("text")
        .ok_or(WebhookError::MissingField("text"))?;
    let response_url = fields
        .remove("response_url")
        .ok_or(WebhookError::MissingField("response_url"))?;

    Ok(CommandRequest {
        text,
        response_url,
        extra: fields,
    })
}
