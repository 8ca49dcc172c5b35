//! ZwiftPower HTTP client.

use crate::error::ZwiftPowerError;
use crate::types::*;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Title used when an event page has no `<title>` element.
pub const UNKNOWN_EVENT_TITLE: &str = "Unknown EventId";

static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<title\b[^>]*>\s*([\s\S]*?)</title>").expect("title pattern is valid")
});

/// ZwiftPower results API and event page client.
#[derive(Clone)]
pub struct ZwiftPowerClient {
    client: Client,
    base_url: String,
}

impl ZwiftPowerClient {
    /// Create a new ZwiftPower client.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ZwiftPowerError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Public link to an event's page.
    pub fn event_url(&self, event_id: &str) -> String {
        format!("{}/events/{}", self.base_url, event_id)
    }

    /// Scrape the title of an event's page.
    #[instrument(skip(self))]
    pub async fn fetch_event_title(&self, event_id: &str) -> Result<String, ZwiftPowerError> {
        let page = self
            .get_text(
                format!("{}/events.php", self.base_url),
                &[("zid", event_id)],
            )
            .await?;

        let title = extract_title(&page).unwrap_or(UNKNOWN_EVENT_TITLE);
        debug!(title, "Resolved event title");
        Ok(title.to_string())
    }

    /// Fetch every result row of one event.
    #[instrument(skip(self))]
    pub async fn fetch_event_results(
        &self,
        event_id: &str,
    ) -> Result<Vec<ResultRow>, ZwiftPowerError> {
        let body = self
            .get_text(
                format!("{}/api3.php", self.base_url),
                &[("do", "event_results"), ("zid", event_id)],
            )
            .await?;

        let results: EventResults = serde_json::from_str(&body)?;
        debug!("Received {} result rows", results.data.len());
        Ok(results.data)
    }

    /// Fetch a team's event listing together with all of its historical rows.
    #[instrument(skip(self))]
    pub async fn fetch_team_history(&self, team_id: &str) -> Result<TeamHistory, ZwiftPowerError> {
        let body = self
            .get_text(
                format!("{}/api3.php", self.base_url),
                &[("do", "team_results"), ("id", team_id)],
            )
            .await?;

        let history: TeamHistory = serde_json::from_str(&body)?;
        debug!(
            "Received {} events and {} result rows",
            history.events.len(),
            history.data.len()
        );
        Ok(history)
    }

    async fn get_text(&self, url: String, query: &[(&str, &str)]) -> Result<String, ZwiftPowerError> {
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, url = %url, "ZwiftPower request failed");
            return Err(ZwiftPowerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.text().await?)
    }
}

/// Content of the first `<title>` element, leading whitespace skipped.
pub fn extract_title(html: &str) -> Option<&str> {
    TITLE_PATTERN
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|title| title.as_str())
}
