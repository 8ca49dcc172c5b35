//! Slack responder errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack rejected response: {status} - {message}")]
    Api { status: u16, message: String },
}
