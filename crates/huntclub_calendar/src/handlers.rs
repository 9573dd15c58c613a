// File: crates/huntclub_calendar/src/handlers.rs
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Json, Response},
};
use huntclub_common::HuntclubError;
use std::sync::Arc;
use tracing::debug;

use crate::error::CalendarError;
use crate::logic::CalendarAggregator;
use crate::models::{CalendarEventsQuery, CalendarSourceSummary, Event};

/// Shared state for the calendar handlers.
///
/// `None` means the feature is disabled (flag off, section missing or no
/// credential) and every list is empty.
#[derive(Clone, Default)]
pub struct CalendarState {
    pub aggregator: Option<Arc<CalendarAggregator>>,
}

impl CalendarState {
    pub fn new(aggregator: CalendarAggregator) -> Self {
        Self {
            aggregator: Some(Arc::new(aggregator)),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

impl CalendarEventsQuery {
    /// Returns the trimmed `(start, end)` pair or a 400-class error naming what is missing.
    pub fn validate(&self) -> Result<(String, String), CalendarError> {
        let start = present(self.start.as_deref());
        let end = present(self.end.as_deref());

        match (start, end) {
            (Some(start), Some(end)) => Ok((start.to_string(), end.to_string())),
            (None, Some(_)) => Err(CalendarError::InvalidRequest(
                "Missing required query parameter: start".to_string(),
            )),
            (Some(_), None) => Err(CalendarError::InvalidRequest(
                "Missing required query parameter: end".to_string(),
            )),
            (None, None) => Err(CalendarError::InvalidRequest(
                "Missing required query parameters: start, end".to_string(),
            )),
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Handler returning the merged events of all configured calendars.
///
/// Only a bad range query is an error. Source failures and a disabled
/// feature answer `200` with whatever the reachable sources returned.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calendar-events", // Path relative to /api
    params(CalendarEventsQuery),
    responses(
        (status = 200, description = "Merged events of all reachable calendars", body = Vec<Event>),
        (status = 400, description = "start or end missing or unreadable", example = json!({"error": "Missing required query parameter: start"}))
    ),
    tag = "Calendar"
))]
pub async fn get_calendar_events_handler(
    State(state): State<Arc<CalendarState>>,
    query: Result<Query<CalendarEventsQuery>, QueryRejection>,
) -> Result<Json<Vec<Event>>, Response> {
    let (start, end) = query
        .map_err(|rejection| {
            CalendarError::InvalidRequest(format!("Invalid query string: {}", rejection.body_text()))
        })
        .and_then(|Query(query)| query.validate())
        .map_err(|err| HuntclubError::from(err).into_response())?;

    let Some(aggregator) = state.aggregator.as_ref() else {
        debug!("calendar feature disabled; returning no events");
        return Ok(Json(Vec::new()));
    };

    // Awaited in place: dropping the request drops every in-flight fetch.
    Ok(Json(aggregator.get_events(&start, &end).await))
}

/// Handler listing the display names of the usable calendar sources.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/calendar-sources",
    responses(
        (status = 200, description = "Configured calendars", body = Vec<CalendarSourceSummary>)
    ),
    tag = "Calendar"
))]
pub async fn get_calendar_sources_handler(
    State(state): State<Arc<CalendarState>>,
) -> Json<Vec<CalendarSourceSummary>> {
    let sources = state
        .aggregator
        .as_ref()
        .map(|aggregator| {
            aggregator
                .sources()
                .iter()
                .map(CalendarSourceSummary::from)
                .collect()
        })
        .unwrap_or_default();
    Json(sources)
}
