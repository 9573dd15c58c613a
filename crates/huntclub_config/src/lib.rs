//! Configuration for the hunting club backend.
//!
//! Values are layered from `config/default.*`, `config/{RUN_ENV}.*` and
//! `HUNTCLUB__*` environment variables, in that order. Secrets are resolved
//! from the environment afterwards.

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod env_vars;
pub mod models;
pub use models::*;

const CALENDAR_API_KEY_PATH: &str = "calendar.api_key";

/// Loads the application configuration using `RUN_ENV`, `PREFIX` and `CONFIG_DIR`.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir =
        PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    load_config_from(&config_dir, &run_env, &prefix)
}

/// Loads configuration from an explicit directory, environment name and variable prefix.
pub fn load_config_from(
    config_dir: &Path,
    run_env: &str,
    prefix: &str,
) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        default_path = %default_path.display(),
        env_path = %env_path.display(),
        prefix,
        "loading configuration"
    );

    let builder = Config::builder()
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(Environment::with_prefix(prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    apply_env_overrides_from_marker(raw_config)
}

/// Resolves `"secret_from_env"` markers and the calendar credential fallback.
///
/// A marker that cannot be resolved leaves the credential unset.
pub fn apply_env_overrides_from_marker(config: AppConfig) -> Result<AppConfig, ConfigError> {
    let mut json = serde_json::to_value(&config)
        .map_err(|err| ConfigError::Message(format!("failed to serialize config: {err}")))?;
    env_vars::inject_env_vars(&mut json);
    let mut config: AppConfig = serde_json::from_value(json)
        .map_err(|err| ConfigError::Message(format!("failed to rebuild config: {err}")))?;

    if let Some(calendar) = config.calendar.as_mut() {
        let unresolved = match calendar.api_key.as_deref() {
            None => true,
            Some(key) => key == env_vars::SECRET_MARKER || key.trim().is_empty(),
        };
        if unresolved {
            calendar.api_key = env_vars::get_secret_env_var(CALENDAR_API_KEY_PATH);
        }
    }

    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file once per process and returns the path that was used.
///
/// `DOTENV_OVERRIDE` wins, then a first CLI argument starting with `.env`,
/// then `.env` in the working directory. A missing file is not an error.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
