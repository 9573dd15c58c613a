// --- File: crates/huntclub_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default base URL of the Google Calendar v3 REST API.
pub const DEFAULT_CALENDAR_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";
/// Page size requested from the provider for each source.
pub const DEFAULT_MAX_RESULTS: u32 = 50;
/// Upper bound for a single source fetch.
pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 10;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct LoggingConfig {
    /// Minimum level for the `huntclub` targets, e.g. "debug". Defaults to "info".
    pub level: Option<String>,
    /// Directory for daily rolling log files. Console only when absent.
    pub directory: Option<String>,
}

// --- Calendar Source Config ---
/// One external calendar feed. A source without an id is skipped.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct CalendarSourceConfig {
    #[serde(default)]
    pub id: Option<String>, // Opaque provider calendar id, e.g. "club@group.calendar.google.com"
    pub display_name: String,
}

impl CalendarSourceConfig {
    /// Returns the trimmed source id if one is configured.
    pub fn usable_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

// --- Calendar Config ---
// Holds non-secret calendar config. The API key may be given as "secret_from_env"
// or left out entirely, in which case it is read from
// HUNTCLUB_SECRET_CALENDAR_API_KEY or CALENDAR_API_KEY.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CalendarConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub max_results: Option<u32>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub sort_chronologically: bool,
    #[serde(default)]
    pub sources: Vec<CalendarSourceConfig>,
}

fn default_true() -> bool {
    true
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base_url: None,
            max_results: None,
            timeout_secs: None,
            sort_chronologically: true,
            sources: Vec::new(),
        }
    }
}

impl CalendarConfig {
    /// The credential, if it is present and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_CALENDAR_API_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn max_results(&self) -> u32 {
        self.max_results.unwrap_or(DEFAULT_MAX_RESULTS)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_SOURCE_TIMEOUT_SECS))
    }

    /// Sources with a non-empty id, in declaration order.
    pub fn usable_sources(&self) -> impl Iterator<Item = &CalendarSourceConfig> {
        self.sources.iter().filter(|s| s.usable_id().is_some())
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_calendar: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub calendar: Option<CalendarConfig>,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}
