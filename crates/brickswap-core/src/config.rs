use crate::app_config::AppConfig;
use crate::ConfigError;

pub(crate) const DEFAULT_CATALOG_BASE_URL: &str = "https://rebrickable.com/api/v3/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it with a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false/1/0, got {raw:?}"),
            }),
        }
    };

    let log_level = or_default("BRICKSWAP_LOG_LEVEL", "info");
    let debug_enabled = parse_bool("BRICKSWAP_DEBUG", false)?;

    let catalog_api_key = lookup("REBRICKABLE_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let catalog_base_url = or_default("BRICKSWAP_CATALOG_BASE_URL", DEFAULT_CATALOG_BASE_URL);
    let request_timeout_secs = parse_u64("BRICKSWAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BRICKSWAP_USER_AGENT", "brickswap/0.1 (catalog-lookup)");

    let cache_enabled = parse_bool("BRICKSWAP_CACHE_ENABLED", true)?;
    let cache_path = PathBuf::from(or_default(
        "BRICKSWAP_CACHE_PATH",
        "./.brickswap/cache.json",
    ));

    Ok(AppConfig {
        log_level,
        debug_enabled,
        catalog_api_key,
        catalog_base_url,
        request_timeout_secs,
        user_agent,
        cache_enabled,
        cache_path,
    })
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
