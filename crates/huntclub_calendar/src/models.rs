// --- File: crates/huntclub_calendar/src/models.rs ---
use huntclub_config::CalendarSourceConfig;
use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

// --- Provider (Google Calendar v3) records ---

/// A `start`/`end` object as sent by the provider.
///
/// Timed events carry `dateTime`, all-day events carry `date`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub date_time: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// The non-blank `dateTime`, if present.
    pub fn timed_value(&self) -> Option<&str> {
        non_blank(self.date_time.as_deref())
    }

    /// The non-blank `date`, if present.
    pub fn date_value(&self) -> Option<&str> {
        non_blank(self.date.as_deref())
    }

    /// `dateTime` if present, else `date`.
    pub fn value(&self) -> Option<&str> {
        self.timed_value().or_else(|| self.date_value())
    }
}

/// One event record from the provider's `items` array.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawProviderEvent {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub start: Option<EventDateTime>,
    #[serde(default)]
    pub end: Option<EventDateTime>,
}

impl RawProviderEvent {
    /// True when the record has the id and start the canonical event requires.
    pub fn has_identity(&self) -> bool {
        non_blank(self.id.as_deref()).is_some()
            && self.start.as_ref().and_then(EventDateTime::value).is_some()
    }
}

/// Body of a successful events list call.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventsListResponse {
    #[serde(default)]
    pub items: Vec<RawProviderEvent>,
    #[serde(default)]
    pub error: Option<ProviderErrorBody>,
}

/// Error envelope: `{ "error": { "code": 403, "message": "..." } }`.
#[derive(Deserialize, Debug)]
pub struct ProviderErrorEnvelope {
    pub error: ProviderErrorBody,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ProviderErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
}

// --- Canonical event ---

/// Tag identifying which provider an event came from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EventProvider {
    #[default]
    Google,
}

/// The provider-agnostic event returned to the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[cfg_attr(feature = "openapi", schema(example = "4k2v9q0h8f3c1"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = "Work day at the lease"))]
    pub title: String,
    /// RFC 3339 instant for timed events, `YYYY-MM-DD` for all-day events.
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-04T07:00:00-05:00"))]
    pub start: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-04T12:00:00-05:00"))]
    pub end: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub is_all_day: bool,
    pub is_public: bool,
    #[serde(default)]
    pub source: EventProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(example = "Club Calendar"))]
    pub calendar_name: Option<String>,
}

// --- Configured sources ---

/// One configured calendar feed with a usable id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSource {
    pub id: String,
    pub display_name: String,
}

impl CalendarSource {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Builds a source from config, or `None` when the id is missing or blank.
    pub fn from_config(config: &CalendarSourceConfig) -> Option<Self> {
        config
            .usable_id()
            .map(|id| Self::new(id, config.display_name.trim()))
    }
}

/// Public view of a configured source, without its id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CalendarSourceSummary {
    #[cfg_attr(feature = "openapi", schema(example = "Club Calendar"))]
    pub display_name: String,
}

impl From<&CalendarSource> for CalendarSourceSummary {
    fn from(source: &CalendarSource) -> Self {
        Self {
            display_name: source.display_name.clone(),
        }
    }
}

// --- Inbound query ---

#[derive(Deserialize, Debug, Default, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct CalendarEventsQuery {
    /// First day of the range in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-10-01"))]
    pub start: Option<String>,

    /// Last day of the range (inclusive) in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-10-31"))]
    pub end: Option<String>,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
