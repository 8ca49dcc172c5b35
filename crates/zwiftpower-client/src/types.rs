//! ZwiftPower API types.

use serde::de::{Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// One rider's result in one event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultRow {
    #[serde(rename = "zid", deserialize_with = "string_or_number")]
    pub event_id: String,
    #[serde(rename = "tname", deserialize_with = "nullable_string")]
    pub team_name: String,
    pub category: String,
    #[serde(rename = "position_in_cat", deserialize_with = "string_or_number")]
    pub position_in_category: String,
    #[serde(rename = "name")]
    pub athlete_name: String,
}

/// An event as listed in a team's history.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EventSummary {
    #[serde(rename = "zid", deserialize_with = "string_or_number")]
    pub id: String,
    pub title: String,
}

/// `do=event_results` response.
#[derive(Debug, Clone, Deserialize)]
pub struct EventResults {
    pub data: Vec<ResultRow>,
}

/// `do=team_results` response.
///
/// `events` keeps the order the API listed them in; the API lists oldest first.
#[derive(Debug, Clone, Deserialize)]
pub struct TeamHistory {
    #[serde(deserialize_with = "events_in_document_order")]
    pub events: Vec<EventSummary>,
    pub data: Vec<ResultRow>,
}

impl TeamHistory {
    /// The last `count` events, in listing order.
    pub fn recent_events(&self, count: usize) -> &[EventSummary] {
        let start = self.events.len().saturating_sub(count);
        &self.events[start..]
    }

    /// All result rows recorded for one event.
    pub fn rows_for_event<'a>(&'a self, event_id: &'a str) -> impl Iterator<Item = &'a ResultRow> {
        self.data.iter().filter(move |row| row.event_id == event_id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Unsigned(u64),
    Signed(i64),
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Unsigned(n) => n.to_string(),
        StringOrNumber::Signed(n) => n.to_string(),
    })
}

/// Riders without a team come back as `null`.
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn events_in_document_order<'de, D>(deserializer: D) -> Result<Vec<EventSummary>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EventsVisitor;

    impl<'de> Visitor<'de> for EventsVisitor {
        type Value = Vec<EventSummary>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of events keyed by id")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut events = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, event)) = map.next_entry::<IgnoredAny, EventSummary>()? {
                events.push(event);
            }
            Ok(events)
        }

        // PHP encodes an empty map as `[]`
        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut events = Vec::new();
            while let Some(event) = seq.next_element::<EventSummary>()? {
                events.push(event);
            }
            Ok(events)
        }
    }

    deserializer.deserialize_any(EventsVisitor)
}
