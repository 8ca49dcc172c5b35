//! Team command - the team's most recent events.

use crate::commands::{CommandHandler, Reply};
use crate::error::AppResult;
use crate::report::ResultReport;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};
use zwiftpower_client::ZwiftPowerClient;

const DEFAULT_EVENT_COUNT: i32 = 1;

pub struct TeamHandler {
    zwiftpower: Arc<ZwiftPowerClient>,
    team_id: String,
    team_name: String,
}

impl TeamHandler {
    pub fn new(
        zwiftpower: Arc<ZwiftPowerClient>,
        team_id: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            zwiftpower,
            team_id: team_id.into(),
            team_name: team_name.into(),
        }
    }
}

#[async_trait]
impl CommandHandler for TeamHandler {
    fn name(&self) -> &str {
        "team"
    }

    fn usage(&self) -> &str {
        "`team [count]`"
    }

    #[instrument(skip(self))]
    async fn execute(&self, args: &[String]) -> AppResult<Reply> {
        let count = args
            .first()
            .and_then(|arg| arg.parse::<i32>().ok())
            .unwrap_or(DEFAULT_EVENT_COUNT);

        let history = self.zwiftpower.fetch_team_history(&self.team_id).await?;

        // A negative count selects nothing
        let events = history.recent_events(usize::try_from(count).unwrap_or(0));
        info!(team_id = %self.team_id, count, selected = events.len(), "Building team report");

        let mut text = format!(
            ":warning: {} Team Results\nResults for the last {} event(s)\n",
            self.team_name, count
        );
        for event in events {
            let report = ResultReport::build(
                format!("{} - {}", event.title, self.zwiftpower.event_url(&event.id)),
                history.rows_for_event(&event.id),
                &self.team_name,
            );
            text.push_str(&report.to_string());
        }

        Ok(Reply::in_channel(text))
    }
}
