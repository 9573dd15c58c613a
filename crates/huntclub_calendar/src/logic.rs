// --- File: crates/huntclub_calendar/src/logic.rs ---
//! Multi-source aggregation.
//!
//! Every configured source is fetched concurrently, each under its own
//! timeout and its own panic guard. A failed source contributes nothing and
//! leaves one [`SourceDiagnostic`] behind; the others are unaffected.

use chrono::{DateTime, NaiveDate, Utc};
use futures::future::join_all;
use futures::FutureExt;
use huntclub_config::{CalendarConfig, DEFAULT_SOURCE_TIMEOUT_SECS};
use serde::Serialize;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::{CalendarError, FailureKind, SourceError};
use crate::models::{CalendarSource, Event, RawProviderEvent};
use crate::normalize::normalize;
use crate::source::{CalendarSourceClient, GoogleCalendarSource};

/// Tracing target for per-source failure records.
pub const DIAGNOSTICS_TARGET: &str = "huntclub::calendar::diagnostics";

/// Tunables for one aggregator instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorSettings {
    pub source_timeout: Duration,
    pub sort_chronologically: bool,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            source_timeout: Duration::from_secs(DEFAULT_SOURCE_TIMEOUT_SECS),
            sort_chronologically: true,
        }
    }
}

impl AggregatorSettings {
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self {
            source_timeout: config.timeout(),
            sort_chronologically: config.sort_chronologically,
        }
    }
}

/// Structured record of one source that contributed no events.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SourceDiagnostic {
    pub calendar_name: String,
    pub source_id: String,
    pub kind: FailureKind,
    pub status: Option<u16>,
    pub message: String,
    pub elapsed_ms: u64,
}

impl SourceDiagnostic {
    pub fn new(source: &CalendarSource, error: &SourceError, elapsed: Duration) -> Self {
        Self {
            calendar_name: source.display_name.clone(),
            source_id: source.id.clone(),
            kind: error.kind(),
            status: error.status(),
            message: error.to_string(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Writes the record as one WARN event under [`DIAGNOSTICS_TARGET`].
    pub fn emit(&self) {
        warn!(
            target: DIAGNOSTICS_TARGET,
            calendar = %self.calendar_name,
            source_id = %self.source_id,
            kind = %self.kind,
            status = ?self.status,
            elapsed_ms = self.elapsed_ms,
            message = %self.message,
            "calendar source contributed no events"
        );
    }
}

/// Full result of one aggregation. Only `events` is sent to callers.
#[derive(Debug, Clone, Default)]
pub struct AggregateReport {
    pub events: Vec<Event>,
    pub diagnostics: Vec<SourceDiagnostic>,
    pub sources_queried: usize,
}

/// Merges the events of a fixed set of sources.
pub struct CalendarAggregator {
    client: Arc<dyn CalendarSourceClient>,
    sources: Vec<CalendarSource>,
    settings: AggregatorSettings,
}

impl CalendarAggregator {
    pub fn new(
        client: Arc<dyn CalendarSourceClient>,
        sources: Vec<CalendarSource>,
        settings: AggregatorSettings,
    ) -> Self {
        Self {
            client,
            sources,
            settings,
        }
    }

    /// Builds an aggregator backed by Google Calendar.
    ///
    /// Returns `Ok(None)` when the credential is absent: the feature is then
    /// disabled and no outbound call is ever made.
    pub fn from_config(config: &CalendarConfig) -> Result<Option<Self>, CalendarError> {
        let Some(client) = GoogleCalendarSource::from_config(config)? else {
            info!("Calendar credential not configured; calendar aggregation disabled");
            return Ok(None);
        };

        let sources: Vec<CalendarSource> = config
            .sources
            .iter()
            .filter_map(|source| {
                let usable = CalendarSource::from_config(source);
                if usable.is_none() {
                    debug!(calendar = %source.display_name, "skipping calendar source without id");
                }
                usable
            })
            .collect();

        info!(sources = sources.len(), "Calendar aggregation configured");

        Ok(Some(Self::new(
            Arc::new(client),
            sources,
            AggregatorSettings::from_config(config),
        )))
    }

    pub fn sources(&self) -> &[CalendarSource] {
        &self.sources
    }

    pub fn settings(&self) -> &AggregatorSettings {
        &self.settings
    }

    /// The merged events of all reachable sources for a day range.
    pub async fn get_events(&self, range_start: &str, range_end: &str) -> Vec<Event> {
        self.collect(range_start, range_end).await.events
    }

    /// Fetches, normalizes and merges all sources, keeping the failure records.
    pub async fn collect(&self, range_start: &str, range_end: &str) -> AggregateReport {
        if self.sources.is_empty() {
            debug!("no calendar sources configured");
            return AggregateReport::default();
        }

        let started = Instant::now();
        let outcomes = join_all(
            self.sources
                .iter()
                .map(|source| self.fetch_source(source, range_start, range_end)),
        )
        .await;

        let mut report = AggregateReport {
            sources_queried: self.sources.len(),
            ..Default::default()
        };

        for outcome in outcomes {
            match outcome {
                Ok((source, raw_events)) => {
                    report.events.extend(
                        raw_events
                            .iter()
                            .map(|raw| normalize(raw, Some(source.display_name.as_str()))),
                    );
                }
                Err(diagnostic) => {
                    diagnostic.emit();
                    report.diagnostics.push(diagnostic);
                }
            }
        }

        if self.settings.sort_chronologically {
            sort_chronologically(&mut report.events);
        }

        info!(
            range_start,
            range_end,
            sources = report.sources_queried,
            failed = report.diagnostics.len(),
            events = report.events.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "calendar aggregation finished"
        );

        report
    }

    async fn fetch_source<'a>(
        &self,
        source: &'a CalendarSource,
        range_start: &str,
        range_end: &str,
    ) -> Result<(&'a CalendarSource, Vec<RawProviderEvent>), SourceDiagnostic> {
        let started = Instant::now();
        // The call itself sits inside the guarded future so a client that
        // panics before returning its future is caught too.
        let fetch = AssertUnwindSafe(async {
            self.client
                .fetch_events(&source.id, range_start, range_end)
                .await
        })
        .catch_unwind();

        let result = match tokio::time::timeout(self.settings.source_timeout, fetch).await {
            Ok(Ok(result)) => result,
            Ok(Err(panic)) => Err(SourceError::Panicked(panic_message(panic.as_ref()))),
            Err(_) => Err(SourceError::Timeout(format!(
                "no response within {} ms",
                self.settings.source_timeout.as_millis()
            ))),
        };

        match result {
            Ok(raw_events) => {
                debug!(
                    calendar = %source.display_name,
                    events = raw_events.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "calendar source fetched"
                );
                Ok((source, raw_events))
            }
            Err(error) => Err(SourceDiagnostic::new(source, &error, started.elapsed())),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Instant used to order an event start.
///
/// RFC 3339 values are compared in UTC, bare dates as midnight UTC.
pub fn start_sort_key(start: &str) -> Option<DateTime<Utc>> {
    let start = start.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(start) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(start, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Stable sort by start. Unparseable starts go last in their original order.
pub fn sort_chronologically(events: &mut [Event]) {
    events.sort_by_key(|event| {
        let key = start_sort_key(&event.start);
        (key.is_none(), key)
    });
}
