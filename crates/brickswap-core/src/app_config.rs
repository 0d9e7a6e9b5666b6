use std::path::PathBuf;

use crate::ConfigError;

/// Runtime configuration resolved once at startup.
///
/// The catalog API key is injected here rather than compiled in; commands
/// that reach the network call [`AppConfig::require_api_key`].
#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub debug_enabled: bool,
    pub catalog_api_key: Option<String>,
    pub catalog_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub cache_enabled: bool,
    pub cache_path: PathBuf,
}

impl AppConfig {
    /// Returns the catalog API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `REBRICKABLE_API_KEY` was
    /// not set at startup.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.catalog_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("REBRICKABLE_API_KEY".to_string()))
    }

    /// Default tracing filter: `debug` when the debug flag is on, otherwise
    /// the configured log level.
    #[must_use]
    pub fn default_log_filter(&self) -> &str {
        if self.debug_enabled {
            "debug"
        } else {
            &self.log_level
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("debug_enabled", &self.debug_enabled)
            .field(
                "catalog_api_key",
                &self.catalog_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("catalog_base_url", &self.catalog_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_path", &self.cache_path)
            .finish()
    }
}
