//! Runtime feature flags.
//!
//! A feature is enabled when its `use_*` flag is set and its config section is
//! present. Disabled features still mount their routes but answer with empty
//! results.

use huntclub_config::AppConfig;

/// Check if a feature is enabled from its flag and optional config section.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the calendar feature is enabled.
pub fn is_calendar_enabled(config: &AppConfig) -> bool {
    is_feature_enabled(config.use_calendar, config.calendar.as_ref())
}
