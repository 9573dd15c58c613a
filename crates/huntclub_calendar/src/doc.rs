// File: crates/huntclub_calendar/src/doc.rs

#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::models::{CalendarEventsQuery, CalendarSourceSummary, Event, EventProvider};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::get_calendar_events_handler,
        crate::handlers::get_calendar_sources_handler
    ),
    components(
        schemas(Event, EventProvider, CalendarSourceSummary, CalendarEventsQuery)
    ),
    tags(
        (name = "Calendar", description = "Merged club and partner calendars")
    ),
    servers(
        (url = "/api", description = "Hunting club API server")
    )
)]
pub struct CalendarApiDoc;
