//! Application configuration

use crate::error::{AppError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL (overridable via `STOXIE_API_URL`)
const DEFAULT_API_URL: &str = "http://localhost:8000";

/// How many catalog entries to pull per session (the backend supports up to 500)
pub const DEFAULT_CATALOG_LIMIT: usize = 500;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend base URL, without a trailing slash
    pub base_url: String,

    /// Directory for client-local persisted state (favorites)
    pub data_dir: PathBuf,

    /// Catalog fetch size for the session cache
    pub catalog_limit: usize,

    /// Per-request timeout for backend calls
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Build configuration from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("STOXIE_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let data_dir = dirs::data_dir()
            .ok_or_else(|| AppError::Config("no data directory available".to_string()))?
            .join("stoxie");

        Ok(Self::new(base_url, data_dir))
    }

    /// Build configuration with an explicit base URL and data directory.
    pub fn new(base_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            data_dir: data_dir.into(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed_from_base_url() {
        let config = AppConfig::new("http://localhost:8000/", "/tmp/stoxie");
        assert_eq!(config.base_url, "http://localhost:8000");
    }

    #[test]
    fn defaults_are_applied() {
        let config = AppConfig::new("http://localhost:8000", "/tmp/stoxie");
        assert_eq!(config.catalog_limit, DEFAULT_CATALOG_LIMIT);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }
}
