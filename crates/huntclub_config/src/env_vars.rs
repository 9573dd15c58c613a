//! Environment variable naming for the hunting club backend.
//!
//! Plain settings use `HUNTCLUB__SECTION__KEY`. Secrets use
//! `HUNTCLUB_SECRET_SECTION_KEY`, with the unprefixed `SECTION_KEY` form
//! accepted as a fallback.

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "HUNTCLUB";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "HUNTCLUB_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Placeholder value that asks for a secret to be read from the environment
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.port"` becomes `"HUNTCLUB__SERVER__PORT"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"calendar.api_key"` becomes `"HUNTCLUB_SECRET_CALENDAR_API_KEY"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its unprefixed environment variable name
///
/// `"calendar.api_key"` becomes `"CALENDAR_API_KEY"`.
pub fn legacy_secret_path_to_env_var(path: &str) -> String {
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() < 2 {
        return path.to_uppercase();
    }

    let service = parts[0];
    let key = parts[1..].join(SECRET_SEPARATOR);
    format!("{}_{}", service, key).to_uppercase()
}

/// Get an environment variable for a configuration path
pub fn get_config_env_var(path: &str) -> Option<String> {
    let env_var = config_path_to_env_var(path);
    env::var(&env_var).ok()
}

/// Get an environment variable for a secret path
///
/// The prefixed name wins over the unprefixed one. Empty values count as unset.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    let env_var = secret_path_to_env_var(path);
    if let Ok(value) = env::var(&env_var) {
        if !value.trim().is_empty() {
            return Some(value);
        }
    }

    let legacy_env_var = legacy_secret_path_to_env_var(path);
    env::var(&legacy_env_var)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Check if a path names a secret
///
/// Paths containing "secret", "key", "password" or "token" are treated as secrets.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    path_lower.contains("secret")
        || path_lower.contains("key")
        || path_lower.contains("password")
        || path_lower.contains("token")
}

/// Get an environment variable for a path, using the secret naming scheme where it applies
pub fn get_env_var(path: &str) -> Option<String> {
    if is_secret_path(path) {
        get_secret_env_var(path)
    } else {
        get_config_env_var(path)
    }
}

/// Replace every `"secret_from_env"` string in a JSON value with its environment value
///
/// Markers without a matching variable are left untouched. Returns `true` if
/// anything was replaced.
pub fn inject_env_vars(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::Array(arr) => {
                for (i, v) in arr.iter_mut().enumerate() {
                    let mut new_path = path.clone();
                    new_path.push(i.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                if let Some(env_val) = get_env_var(&path_str) {
                    *s = env_val;
                    replaced = true;
                } else {
                    tracing::warn!(path = %path_str, "no environment value found for secret_from_env");
                }
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}
