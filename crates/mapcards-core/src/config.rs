use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or is out of range.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or is out of range.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can use a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let value = or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be greater than zero".to_string()));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("MAPCARDS_ENV", "development"))?;
    let log_level = or_default("MAPCARDS_LOG_LEVEL", "info");

    let collection_limit = parse_positive_usize("MAPCARDS_COLLECTION_LIMIT", "500")?;

    let scroll_interval_secs = parse_u64("MAPCARDS_SCROLL_INTERVAL_SECS", "3")?;
    let scroll_max_cycles = parse_positive_u32("MAPCARDS_SCROLL_MAX_CYCLES", "50")?;
    let scroll_stall_threshold = parse_positive_u32("MAPCARDS_SCROLL_STALL_THRESHOLD", "8")?;
    let scroll_steps = parse_positive_u32("MAPCARDS_SCROLL_STEPS", "4")?;
    let scroll_step_interval_ms = parse_u64("MAPCARDS_SCROLL_STEP_INTERVAL_MS", "200")?;

    let export_dir = PathBuf::from(or_default("MAPCARDS_EXPORT_DIR", "."));
    let request_timeout_secs = parse_u64("MAPCARDS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MAPCARDS_USER_AGENT", "mapcards/0.1 (listing-collector)");

    Ok(AppConfig {
        env,
        log_level,
        collection_limit,
        scroll_interval_secs,
        scroll_max_cycles,
        scroll_stall_threshold,
        scroll_steps,
        scroll_step_interval_ms,
        export_dir,
        request_timeout_secs,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MAPCARDS_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
