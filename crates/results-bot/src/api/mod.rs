//! Slash command webhook.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::commands::CommandRegistry;
use crate::worker::CommandRequest;
use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Commands the worker knows how to run
    pub registry: Arc<CommandRegistry>,
    /// Producer side of the work queue
    pub queue: mpsc::Sender<CommandRequest>,
}

impl AppState {
    /// Create new application state.
    pub fn new(registry: Arc<CommandRegistry>, queue: mpsc::Sender<CommandRequest>) -> Self {
        Self { registry, queue }
    }
}

/// Create the webhook router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/slack/commands",
            get(handlers::slash_command).post(handlers::slash_command),
        )
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
