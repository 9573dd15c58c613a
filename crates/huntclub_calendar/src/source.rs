// --- File: crates/huntclub_calendar/src/source.rs ---
//! Calendar source client.
//!
//! One call fetches one calendar's events for a day range. There is no retry
//! and no pagination loop. The provider is asked for at most `max_results`
//! events, already ordered by start time.

use async_trait::async_trait;
use huntclub_common::create_client;
use huntclub_config::CalendarConfig;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{CalendarError, SourceError};
use crate::models::{EventsListResponse, ProviderErrorEnvelope, RawProviderEvent};

/// Longest provider error body kept in a diagnostic message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Reads raw events from one external calendar.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CalendarSourceClient: Send + Sync {
    /// Fetches the raw events of `source_id` between two calendar dates, both inclusive.
    async fn fetch_events(
        &self,
        source_id: &str,
        range_start: &str,
        range_end: &str,
    ) -> Result<Vec<RawProviderEvent>, SourceError>;
}

/// Expands a day range to the instant range sent upstream.
///
/// `("2025-10-01", "2025-10-31")` becomes
/// `("2025-10-01T00:00:00Z", "2025-10-31T23:59:59Z")`.
pub fn expand_range(range_start: &str, range_end: &str) -> (String, String) {
    (
        format!("{}T00:00:00Z", range_start.trim()),
        format!("{}T23:59:59Z", range_end.trim()),
    )
}

/// Google Calendar v3 client authenticated with an API key.
#[derive(Debug, Clone)]
pub struct GoogleCalendarSource {
    client: Client,
    api_key: String,
    base_url: Url,
    max_results: u32,
}

impl GoogleCalendarSource {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        max_results: u32,
        timeout: Duration,
    ) -> Result<Self, CalendarError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            CalendarError::InvalidConfiguration(format!("api_base_url '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CalendarError::InvalidConfiguration(format!(
                "api_base_url '{}' cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            client: create_client(timeout, true)?,
            api_key: api_key.into(),
            base_url,
            max_results: max_results.max(1),
        })
    }

    /// Builds the client from config, or `None` when no credential is configured.
    pub fn from_config(config: &CalendarConfig) -> Result<Option<Self>, CalendarError> {
        let Some(api_key) = config.credential() else {
            return Ok(None);
        };
        Self::new(
            api_key,
            config.api_base_url(),
            config.max_results(),
            config.timeout(),
        )
        .map(Some)
    }

    /// `<base>/calendars/<source_id>/events`, with the id percent-encoded as one segment.
    pub fn events_url(&self, source_id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(&["calendars", source_id, "events"]);
        }
        url
    }
}

#[async_trait]
impl CalendarSourceClient for GoogleCalendarSource {
    async fn fetch_events(
        &self,
        source_id: &str,
        range_start: &str,
        range_end: &str,
    ) -> Result<Vec<RawProviderEvent>, SourceError> {
        let source_id = source_id.trim();
        if source_id.is_empty() {
            return Err(SourceError::InvalidInput("source id is empty".to_string()));
        }
        if range_start.trim().is_empty() || range_end.trim().is_empty() {
            return Err(SourceError::InvalidInput(
                "range start and end are required".to_string(),
            ));
        }

        let (time_min, time_max) = expand_range(range_start, range_end);
        let url = self.events_url(source_id);
        let max_results = self.max_results.to_string();

        debug!(source_id, %time_min, %time_max, "fetching calendar events");

        let response = self
            .client
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("maxResults", max_results.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await
            .map_err(SourceError::from_transport)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(SourceError::from_transport)?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ProviderErrorEnvelope>(&body) {
                Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
                _ => fallback_message(status, &body),
            };
            return Err(SourceError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let list: EventsListResponse =
            serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        if let Some(error) = list.error {
            return Err(SourceError::Rejected {
                status: error.code.unwrap_or(status.as_u16()),
                message: error.message,
            });
        }

        let received = list.items.len();
        let events: Vec<RawProviderEvent> = list
            .items
            .into_iter()
            .filter(|raw| {
                let keep = raw.has_identity();
                if !keep {
                    warn!(source_id, event_id = ?raw.id, "dropping calendar item without id or start");
                }
                keep
            })
            .collect();

        debug!(source_id, received, kept = events.len(), "calendar events fetched");
        Ok(events)
    }
}

fn fallback_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string();
    }
    body.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
