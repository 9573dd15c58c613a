// --- File: crates/huntclub_calendar/src/error.rs ---
use huntclub_common::{HttpStatusCode, HuntclubError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single source contributed no events.
///
/// These never reach the HTTP caller. The aggregator turns them into
/// [`crate::logic::SourceDiagnostic`] records.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The provider could not be reached (DNS, connect, TLS, reset).
    #[error("calendar provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success status.
    #[error("calendar provider rejected the request: {message} (Status: {status})")]
    Rejected { status: u16, message: String },

    /// The response body is not an events list.
    #[error("malformed calendar response: {0}")]
    Malformed(String),

    /// The fetch did not finish in time.
    #[error("calendar request timed out: {0}")]
    Timeout(String),

    /// The call was made with an empty source id or range bound.
    #[error("invalid calendar request: {0}")]
    InvalidInput(String),

    /// The fetch panicked. Only this source is lost.
    #[error("calendar fetch panicked: {0}")]
    Panicked(String),
}

impl SourceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            SourceError::Unreachable(_) => FailureKind::Unreachable,
            SourceError::Rejected { .. } => FailureKind::Rejected,
            SourceError::Malformed(_) => FailureKind::Malformed,
            SourceError::Timeout(_) => FailureKind::Timeout,
            SourceError::InvalidInput(_) => FailureKind::InvalidInput,
            SourceError::Panicked(_) => FailureKind::Panicked,
        }
    }

    /// The provider's HTTP status, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps a transport-level reqwest failure.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout(err.to_string())
        } else {
            SourceError::Unreachable(err.to_string())
        }
    }
}

/// Failure category recorded in diagnostics.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Unreachable,
    Rejected,
    Malformed,
    Timeout,
    InvalidInput,
    Panicked,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Unreachable => "unreachable",
            FailureKind::Rejected => "rejected",
            FailureKind::Malformed => "malformed",
            FailureKind::Timeout => "timeout",
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::Panicked => "panicked",
        };
        f.write_str(name)
    }
}

/// Errors the calendar crate surfaces outside of a source fetch.
#[derive(Error, Debug)]
pub enum CalendarError {
    /// The inbound range query is incomplete.
    #[error("{0}")]
    InvalidRequest(String),

    /// The calendar section is present but unusable.
    #[error("Invalid calendar configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Failed to build calendar HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

impl From<CalendarError> for HuntclubError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidRequest(msg) => HuntclubError::ValidationError(msg),
            CalendarError::InvalidConfiguration(msg) => {
                HuntclubError::ConfigError(format!("Invalid calendar configuration: {}", msg))
            }
            CalendarError::ClientBuild(e) => {
                HuntclubError::InternalError(format!("Calendar HTTP client: {}", e))
            }
        }
    }
}

impl HttpStatusCode for CalendarError {
    fn status_code(&self) -> u16 {
        match self {
            CalendarError::InvalidRequest(_) => 400,
            CalendarError::InvalidConfiguration(_) => 500,
            CalendarError::ClientBuild(_) => 500,
        }
    }
}
