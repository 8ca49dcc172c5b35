//! Queue consumer running one command per message.

use crate::commands::{CommandRegistry, Reply};
use serde::{Deserialize, Serialize};
use slack_responder::SlackResponder;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{error, info, instrument, warn};

/// Posted when a command fails after it was accepted.
pub const FETCH_FAILED: &str = "Sorry, something went wrong fetching results.";

/// Webhook fields that grant access and stay out of logs.
const SECRET_FIELDS: &[&str] = &["token"];

/// A slash command waiting to be run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Raw command text, e.g. `event 12345`.
    pub text: String,
    /// Where the result is delivered.
    pub response_url: String,
    /// Remaining webhook fields.
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl CommandRequest {
    pub fn new(text: impl Into<String>, response_url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            response_url: response_url.into(),
            extra: HashMap::new(),
        }
    }
}

impl fmt::Debug for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut extra: Vec<(&str, &str)> = self
            .extra
            .iter()
            .map(|(key, value)| {
                let value = if SECRET_FIELDS.contains(&key.as_str()) {
                    "[REDACTED]"
                } else {
                    value.as_str()
                };
                (key.as_str(), value)
            })
            .collect();
        extra.sort_unstable();

        f.debug_struct("CommandRequest")
            .field("text", &self.text)
            .field("response_url", &"[REDACTED]")
            .field("extra", &extra)
            .finish()
    }
}

/// Create the bounded queue between the webhook and the worker.
pub fn work_queue(
    capacity: usize,
) -> (mpsc::Sender<CommandRequest>, mpsc::Receiver<CommandRequest>) {
    mpsc::channel(capacity.max(1))
}

/// Executes queued commands and posts their replies.
#[derive(Clone)]
pub struct ResultWorker {
    registry: Arc<CommandRegistry>,
    responder: Arc<SlackResponder>,
}

impl ResultWorker {
    pub fn new(registry: Arc<CommandRegistry>, responder: Arc<SlackResponder>) -> Self {
        Self {
            registry,
            responder,
        }
    }

    /// Consume the queue until every sender is dropped and in-flight commands finish.
    pub async fn run(self, queue: mpsc::Receiver<CommandRequest>) {
        let mut stream = ReceiverStream::new(queue);
        let mut tasks = JoinSet::new();

        loop {
            tokio::select! {
                Some(request) = stream.next() => {
                    let worker = self.clone();
                    tasks.spawn(async move { worker.process(request).await });
                }
                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    if let Err(e) = result {
                        error!("Command task panicked: {}", e);
                    }
                }
                else => break,
            }
        }

        info!("Work queue closed");
    }

    /// Run one command and deliver whatever it produced.
    #[instrument(skip(self, request), fields(text = %request.text))]
    pub async fn process(&self, request: CommandRequest) {
        let reply = match self.registry.try_dispatch(&request.text).await {
            Some(Ok(reply)) => reply,
            Some(Err(e)) => {
                error!("Command failed: {}", e);
                Reply::ephemeral(FETCH_FAILED)
            }
            None => {
                warn!("Unrecognised command reached the worker");
                Reply::ephemeral(self.registry.not_understood(&request.text))
            }
        };

        // Best effort: the webhook was already answered
        if let Err(e) = self
            .responder
            .post(&request.response_url, &reply.text, reply.ephemeral)
            .await
        {
            error!("Failed to deliver reply: {}", e);
        }
    }
}
