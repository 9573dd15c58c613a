// --- File: crates/huntclub_calendar/src/client.rs ---
//! Client-side calendar service.
//!
//! Used by UI-facing code to read `/calendar-events`. It never fails: any
//! transport error, non-success status or undecodable body yields an empty list.

use huntclub_common::{external_service_error, HuntclubError, HTTP_CLIENT};
use reqwest::Client;
use tracing::{debug, warn};

use crate::models::Event;

pub struct CalendarApiClient {
    http: Client,
    base_url: String,
}

impl CalendarApiClient {
    /// `base_url` is the API root the calendar routes are mounted on, e.g. `http://127.0.0.1:8080/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Events for the day range, or an empty list on any failure.
    pub async fn get_events(&self, range_start: &str, range_end: &str) -> Vec<Event> {
        match self.try_get_events(range_start, range_end).await {
            Ok(events) => {
                debug!(events = events.len(), "calendar events received");
                events
            }
            Err(err) => {
                warn!(error = %err, "calendar events unavailable; showing none");
                Vec::new()
            }
        }
    }

    async fn try_get_events(
        &self,
        range_start: &str,
        range_end: &str,
    ) -> Result<Vec<Event>, HuntclubError> {
        let url = format!("{}/calendar-events", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("start", range_start), ("end", range_end)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(external_service_error(
                "Calendar API",
                format!("status {}", status),
            ));
        }

        Ok(response.json::<Vec<Event>>().await?)
    }
}
