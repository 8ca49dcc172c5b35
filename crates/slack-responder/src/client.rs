//! Slack response URL client.

use crate::error::SlackError;
use crate::types::*;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Posts messages back to the `response_url` of a slash command.
#[derive(Clone)]
pub struct SlackResponder {
    client: Client,
}

impl SlackResponder {
    /// Create a new responder.
    pub fn new(timeout: Duration) -> Result<Self, SlackError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client })
    }

    /// Post `text` to a callback URL, replacing the original "working" message.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn post(
        &self,
        callback_url: &str,
        text: &str,
        ephemeral: bool,
    ) -> Result<(), SlackError> {
        let request = DelayedResponse::new(text, ephemeral);

        let response = self.client.post(callback_url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, "Slack response post failed: {}", message);
            return Err(SlackError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(response_type = ?request.response_type, "Posted response");
        Ok(())
    }
}
