//! ZwiftPower results bot.
//!
//! Slack posts a slash command to the webhook (`api`), which answers at once
//! and queues the command. The worker (`worker`) runs it through the
//! `commands` registry, renders a `report`, and delivers it to the command's
//! `response_url`.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod report;
pub mod worker;

pub use config::Config;
pub use error::{AppError, AppResult};
