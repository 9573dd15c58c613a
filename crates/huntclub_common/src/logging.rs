//! Logging setup shared by every hunting club binary.
//!
//! Console output is always on. When a log directory is configured, a daily
//! rolling file is written as well. `RUST_LOG` directives are honoured on top
//! of the configured level for the `huntclub` targets.

use huntclub_config::LoggingConfig;
use tracing::{info, warn, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// File name prefix for rolling log files.
pub const LOG_FILE_PREFIX: &str = "huntclub.log";

/// Initialize logging from the optional `[logging]` config section.
///
/// The returned guard flushes the file writer on drop and must be held for
/// the lifetime of the process.
pub fn init_from_config(config: Option<&LoggingConfig>) -> Option<WorkerGuard> {
    let level = parse_level(config.and_then(|c| c.level.as_deref()));

    let (file_layer, guard) = match config.and_then(|c| c.directory.as_deref()) {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(console_layer())
        .with(file_layer)
        .with(build_filter(level))
        .try_init();

    if result.is_ok() {
        info!(
            level = %level,
            directory = config.and_then(|c| c.directory.as_deref()).unwrap_or("-"),
            "Logging initialized"
        );
    }

    guard
}

fn console_layer<S>() -> impl tracing_subscriber::Layer<S>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
}

fn build_filter(level: Level) -> EnvFilter {
    let filter = EnvFilter::from_default_env();
    match format!("huntclub={}", level).parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Parses a level name, falling back to INFO for anything unrecognised.
pub fn parse_level(level: Option<&str>) -> Level {
    match level {
        None => Level::INFO,
        Some(name) => name.trim().parse::<Level>().unwrap_or_else(|_| {
            warn!("Unknown log level '{}', using INFO", name);
            Level::INFO
        }),
    }
}
