//! Test fixtures for calendar integration tests
//!
//! Builders for application config pointing at a mock provider, and canned
//! provider responses.

#![allow(dead_code)]

use huntclub_config::{AppConfig, CalendarConfig, CalendarSourceConfig, ServerConfig};
use serde_json::{json, Value};
use std::sync::Arc;

pub const CLUB_ID: &str = "club-calendar";
pub const PARTNER_ID: &str = "partner-calendar";

/// Two configured sources, the club's own and a partner club's.
pub fn sources() -> Vec<CalendarSourceConfig> {
    vec![
        CalendarSourceConfig {
            id: Some(CLUB_ID.to_string()),
            display_name: "Club Calendar".to_string(),
        },
        CalendarSourceConfig {
            id: Some(PARTNER_ID.to_string()),
            display_name: "Partner Club".to_string(),
        },
    ]
}

/// App config with the calendar feature pointed at `api_base_url`.
pub fn create_app_config(
    api_base_url: &str,
    api_key: Option<&str>,
    sources: Vec<CalendarSourceConfig>,
) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        use_calendar: true,
        calendar: Some(CalendarConfig {
            api_key: api_key.map(str::to_string),
            api_base_url: Some(api_base_url.to_string()),
            timeout_secs: Some(2),
            sources,
            ..Default::default()
        }),
        logging: None,
    })
}

/// Provider list body for the club calendar.
pub fn club_events() -> Value {
    json!({
        "kind": "calendar#events",
        "items": [
            {
                "id": "club-banquet",
                "summary": "Annual banquet",
                "location": "Legion hall",
                "start": { "dateTime": "2025-10-25T18:00:00-05:00", "timeZone": "America/Chicago" },
                "end": { "dateTime": "2025-10-25T22:00:00-05:00", "timeZone": "America/Chicago" }
            },
            {
                "id": "club-workday",
                "summary": "Work day at the lease",
                "visibility": "private",
                "start": { "date": "2025-10-04" },
                "end": { "date": "2025-10-05" }
            }
        ]
    })
}

/// The provider's permission error envelope.
pub fn forbidden() -> Value {
    json!({
        "error": {
            "code": 403,
            "message": "The caller does not have permission",
            "errors": [{ "reason": "forbidden" }]
        }
    })
}
