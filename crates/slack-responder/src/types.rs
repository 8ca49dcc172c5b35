//! Slack response payload types.

use serde::{Deserialize, Serialize};

/// Who sees a slash command response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    /// Only the invoking user.
    Ephemeral,
    /// Everyone in the channel.
    InChannel,
}

impl ResponseType {
    pub fn from_ephemeral(ephemeral: bool) -> Self {
        if ephemeral {
            Self::Ephemeral
        } else {
            Self::InChannel
        }
    }
}

/// Body posted to a `response_url`.
#[derive(Debug, Clone, Serialize)]
pub struct DelayedResponse {
    pub replace_original: bool,
    pub response_type: ResponseType,
    pub text: String,
}

impl DelayedResponse {
    pub fn new(text: impl Into<String>, ephemeral: bool) -> Self {
        Self {
            replace_original: true,
            response_type: ResponseType::from_ephemeral(ephemeral),
            text: text.into(),
        }
    }
}
