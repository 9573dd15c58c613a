// --- File: crates/huntclub_calendar/src/routes.rs ---

use crate::handlers::{get_calendar_events_handler, get_calendar_sources_handler, CalendarState};
use crate::logic::CalendarAggregator;
use axum::{routing::get, Router};
use huntclub_common::is_calendar_enabled;
use huntclub_config::AppConfig;
use std::sync::Arc;
use tracing::{error, info};

/// Creates the router for the calendar feature.
///
/// The routes are always mounted. When the feature is disabled or cannot be
/// set up they answer with empty lists.
pub fn routes(config: Arc<AppConfig>) -> Router {
    router(build_state(&config))
}

/// Creates the calendar router around an already built state.
pub fn router(state: CalendarState) -> Router {
    Router::new()
        .route("/calendar-events", get(get_calendar_events_handler))
        .route("/calendar-sources", get(get_calendar_sources_handler))
        .with_state(Arc::new(state))
}

/// Builds the handler state from the application config.
pub fn build_state(config: &AppConfig) -> CalendarState {
    let Some(calendar) = config.calendar.as_ref().filter(|_| is_calendar_enabled(config)) else {
        info!("ℹ️ Calendar feature disabled by configuration");
        return CalendarState::disabled();
    };

    match CalendarAggregator::from_config(calendar) {
        Ok(Some(aggregator)) => CalendarState::new(aggregator),
        Ok(None) => CalendarState::disabled(),
        Err(err) => {
            error!(error = %err, "Calendar feature could not be initialized; serving empty lists");
            CalendarState::disabled()
        }
    }
}
