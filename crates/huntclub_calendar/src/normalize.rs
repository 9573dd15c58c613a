// --- File: crates/huntclub_calendar/src/normalize.rs ---
//! Provider record to canonical [`Event`].

use crate::models::{non_blank, Event, EventDateTime, EventProvider, RawProviderEvent};

/// Title used when the provider sends none.
pub const DEFAULT_TITLE: &str = "Untitled Event";

/// Maps a raw provider event to the canonical shape.
///
/// Never fails: absent optional fields get their defaults. `start`/`end` are
/// copied verbatim. An event is all-day exactly when its start has a `date`
/// and no `dateTime`. A missing end falls back to the start value.
pub fn normalize(raw: &RawProviderEvent, calendar_name: Option<&str>) -> Event {
    let start_value = raw
        .start
        .as_ref()
        .and_then(EventDateTime::value)
        .unwrap_or_default()
        .to_string();
    let end_value = raw
        .end
        .as_ref()
        .and_then(EventDateTime::value)
        .map(str::to_string)
        .unwrap_or_else(|| start_value.clone());

    Event {
        id: raw.id.clone().unwrap_or_default(),
        title: non_blank(raw.summary.as_deref())
            .unwrap_or(DEFAULT_TITLE)
            .to_string(),
        start: start_value,
        end: end_value,
        description: raw.description.clone().unwrap_or_default(),
        location: raw.location.clone().unwrap_or_default(),
        is_all_day: raw.start.as_ref().is_some_and(is_date_only),
        is_public: !is_private(raw.visibility.as_deref()),
        source: EventProvider::Google,
        calendar_name: calendar_name.map(str::to_string),
    }
}

/// True when the time object carries a bare date and no time of day.
pub fn is_date_only(time: &EventDateTime) -> bool {
    time.timed_value().is_none() && time.date_value().is_some()
}

fn is_private(visibility: Option<&str>) -> bool {
    visibility.is_some_and(|v| v.trim().eq_ignore_ascii_case("private"))
}
