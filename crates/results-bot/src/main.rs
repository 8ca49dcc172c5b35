//! ZwiftPower results bot - Main entry point.

use anyhow::Context;
use results_bot::api::{create_router, AppState};
use results_bot::commands::{CommandRegistry, EventHandler, TeamHandler};
use results_bot::worker::{work_queue, ResultWorker};
use results_bot::{AppResult, Config};
use slack_responder::SlackResponder;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zwiftpower_client::ZwiftPowerClient;

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting ZwiftPower results bot...");

    // Initialize clients
    let zwiftpower = Arc::new(
        ZwiftPowerClient::new(&config.zwiftpower.base_url, config.zwiftpower.timeout)
            .context("Failed to create ZwiftPower client")?,
    );

    let responder = Arc::new(
        SlackResponder::new(config.slack.timeout).context("Failed to create Slack responder")?,
    );

    // Create command handlers
    let registry = Arc::new(
        CommandRegistry::new()
            .register(Box::new(EventHandler::new(
                zwiftpower.clone(),
                config.zwiftpower.team_name.clone(),
            )))
            .register(Box::new(TeamHandler::new(
                zwiftpower.clone(),
                config.zwiftpower.team_id.clone(),
                config.zwiftpower.team_name.clone(),
            ))),
    );

    info!("Registered {} command handlers", registry.len());
    info!(
        "Reporting on team {} ({})",
        config.zwiftpower.team_name, config.zwiftpower.team_id
    );

    // Start worker
    let (queue, receiver) = work_queue(config.queue.capacity);
    let worker = tokio::spawn(ResultWorker::new(registry.clone(), responder).run(receiver));

    // Start webhook server
    let app = create_router(AppState::new(registry, queue));

    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .context("Invalid listen address")?,
        config.server.port,
    );
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    // The router owned the last queue sender; the worker drains and exits
    info!("Shutting down...");
    worker.await.context("Worker task failed")?;
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
