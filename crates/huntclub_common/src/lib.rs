// --- File: crates/huntclub_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Runtime feature flags
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities

pub use error::{config_error, external_service_error, HttpStatusCode, HuntclubError};

pub use http::{
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

pub use logging::{init_from_config, parse_level};

pub use features::{is_calendar_enabled, is_feature_enabled};
