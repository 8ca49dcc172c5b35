//! Event command - one event's results for the team.

use crate::commands::{CommandHandler, Reply};
use crate::error::AppResult;
use crate::report::ResultReport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};
use zwiftpower_client::ZwiftPowerClient;

pub const INVALID_EVENT_ID: &str = "Invalid event id!";

pub struct EventHandler {
    zwiftpower: Arc<ZwiftPowerClient>,
    team_name: String,
}

impl EventHandler {
    pub fn new(zwiftpower: Arc<ZwiftPowerClient>, team_name: impl Into<String>) -> Self {
        Self {
            zwiftpower,
            team_name: team_name.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for EventHandler {
    fn name(&self) -> &str {
        "event"
    }

    fn usage(&self) -> &str {
        "`event <id>`"
    }

    #[instrument(skip(self))]
    async fn execute(&self, args: &[String]) -> AppResult<Reply> {
        let Some(event_id) = args.first().and_then(|arg| arg.parse::<i32>().ok()) else {
            info!("Rejecting event command without a numeric id");
            return Ok(Reply::ephemeral(INVALID_EVENT_ID));
        };
        let event_id = event_id.to_string();

        let (title, rows) = tokio::try_join!(
            self.zwiftpower.fetch_event_title(&event_id),
            self.zwiftpower.fetch_event_results(&event_id),
        )?;

        info!(event_id = %event_id, rows = rows.len(), "Building event report");
        let report = ResultReport::build(
            format!("{}\nResults for {}:", title, self.team_name),
            &rows,
            &self.team_name,
        );

        Ok(Reply::in_channel(report.to_string()))
    }
}
