//! Slack slash command response delivery.

mod client;
mod error;
mod types;

pub use client::SlackResponder;
pub use error::SlackError;
pub use types::*;
