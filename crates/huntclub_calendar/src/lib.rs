// --- File: crates/huntclub_calendar/src/lib.rs ---
// Declare modules within this crate
pub mod client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_test;
pub mod models;
pub mod normalize;
#[cfg(test)]
mod normalize_proptest;
pub mod routes;
pub mod source;

pub use client::CalendarApiClient;
pub use error::{CalendarError, FailureKind, SourceError};
pub use logic::{AggregateReport, AggregatorSettings, CalendarAggregator, SourceDiagnostic};
pub use models::{CalendarSource, CalendarSourceSummary, Event, EventProvider, RawProviderEvent};
pub use source::{CalendarSourceClient, GoogleCalendarSource};
