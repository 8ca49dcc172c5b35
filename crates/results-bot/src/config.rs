//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// ZwiftPower configuration
    pub zwiftpower: ZwiftPowerConfig,

    /// Slack configuration
    #[serde(default)]
    pub slack: SlackConfig,

    /// Webhook server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Work queue configuration
    #[serde(default)]
    pub queue: QueueConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ZwiftPowerConfig {
    /// Site root serving `api3.php` and `events.php`
    #[serde(default = "default_zwiftpower_url")]
    pub base_url: String,

    /// Team whose history `team` reports on
    pub team_id: String,

    /// Team name exactly as ZwiftPower prints it; rows are matched against it
    pub team_name: String,

    /// Request timeout
    #[serde(default = "default_zwiftpower_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    /// Timeout for posts to response URLs
    #[serde(default = "default_slack_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    /// Commands waiting for the worker before the webhook starts refusing
    #[serde(default = "default_queue_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// Default implementations
impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            timeout: default_slack_timeout(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_queue_capacity(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// Default value functions
fn default_zwiftpower_url() -> String {
    "https://zwiftpower.com".into()
}

fn default_zwiftpower_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_slack_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_queue_capacity() -> usize {
    64
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let builder = config::Config::builder().add_source(
            config::Environment::default()
                .separator("__")
                // Team ids and names must stay strings
                .try_parsing(false),
        );

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
