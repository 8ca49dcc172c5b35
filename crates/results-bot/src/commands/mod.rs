//! Slash command parsing and handlers.

mod event;
mod team;

pub use event::{EventHandler, INVALID_EVENT_ID};
pub use team::TeamHandler;

use crate::error::AppResult;
use async_trait::async_trait;
use tracing::debug;

/// A command name and its arguments, split on single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    name: String,
    args: Vec<String>,
}

impl Command {
    /// Split `input` on every `' '`.
    ///
    /// Repeated spaces produce empty arguments; they are kept as-is.
    pub fn parse(input: &str) -> Self {
        let mut tokens = input.split(' ').map(str::to_string);
        let name = tokens.next().unwrap_or_default();

        Self {
            name,
            args: tokens.collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// What a handler wants posted back to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Only visible to the user who ran the command.
    pub ephemeral: bool,
}

impl Reply {
    pub fn in_channel(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ephemeral: true,
        }
    }
}

/// Command handler trait.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name (e.g., "event", "team").
    fn name(&self) -> &str;

    /// Short usage shown when a command is not understood.
    fn usage(&self) -> &str;

    /// Execute the command with the tokens following its name.
    async fn execute(&self, args: &[String]) -> AppResult<Reply>;
}

/// Handlers keyed by command name.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler. A later handler with the same name is never reached.
    pub fn register(mut self, handler: Box<dyn CommandHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn find(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers
            .iter()
            .find(|h| h.name() == name)
            .map(|h| h.as_ref())
    }

    /// Whether the first token of `input` names a registered command.
    pub fn recognizes(&self, input: &str) -> bool {
        self.find(Command::parse(input).name()).is_some()
    }

    /// Run the handler named by the first token of `input`.
    ///
    /// Returns `None`, without invoking anything, when no handler matches.
    pub async fn try_dispatch(&self, input: &str) -> Option<AppResult<Reply>> {
        let command = Command::parse(input);
        let handler = self.find(command.name())?;

        debug!(command = command.name(), args = ?command.args(), "Dispatching command");
        Some(handler.execute(command.args()).await)
    }

    /// Reply text for input no handler understands.
    pub fn not_understood(&self, input: &str) -> String {
        let usages = self
            .handlers
            .iter()
            .map(|h| h.usage())
            .collect::<Vec<_>>()
            .join(" or ");

        format!("Sorry, I don't understand `{}`. Try {}.", input, usages)
    }
}
