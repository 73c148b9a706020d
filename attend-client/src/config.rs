//! Client configuration

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ClientResult;
use crate::http::NetworkHttpClient;
use crate::storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
use crate::types::StalePolicy;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration for connecting to the attendance API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted session; `None` keeps it in memory
    pub session_dir: Option<PathBuf>,

    /// Handling of responses that arrive after a newer request
    pub stale_policy: StalePolicy,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            session_dir: None,
            stale_policy: StalePolicy::default(),
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `ATTEND_API_URL` (default `http://localhost:5000`)
    /// - `ATTEND_TIMEOUT_SECS` (default 30)
    /// - `ATTEND_SESSION_DIR` (unset = in-memory session)
    /// - `ATTEND_STALE_POLICY` (`discard` | `last-wins`)
    pub fn from_env() -> Self {
        let base_url = std::env::var("ATTEND_API_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var("ATTEND_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(timeout) => config.timeout = timeout,
                Err(e) => tracing::warn!("Ignoring ATTEND_TIMEOUT_SECS={}: {}", raw, e),
            }
        }

        config.session_dir = std::env::var("ATTEND_SESSION_DIR")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        if let Ok(raw) = std::env::var("ATTEND_STALE_POLICY") {
            match raw.parse() {
                Ok(policy) => config.stale_policy = policy,
                Err(e) => tracing::warn!("Ignoring ATTEND_STALE_POLICY: {}", e),
            }
        }

        config
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Persist the session as a JSON file under `dir`
    pub fn with_session_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.session_dir = Some(dir.into());
        self
    }

    /// Set the stale-response policy
    pub fn with_stale_policy(mut self, policy: StalePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<NetworkHttpClient> {
        NetworkHttpClient::new(self)
    }

    /// Session persistence backend selected by `session_dir`
    pub fn session_storage(&self) -> Arc<dyn SessionStorage> {
        match &self.session_dir {
            Some(dir) => Arc::new(FileSessionStorage::in_dir(dir)),
            None => Arc::new(MemorySessionStorage::new()),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ClientConfig::new("http://api.test")
            .with_timeout(5)
            .with_session_dir("/tmp/attend")
            .with_stale_policy(StalePolicy::LastResponseWins);
        assert_eq!(config.base_url, "http://api.test");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.session_dir, Some(PathBuf::from("/tmp/attend")));
        assert_eq!(config.stale_policy, StalePolicy::LastResponseWins);
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        for url in ["not a url", "localhost:5000", "ftp://api.test"] {
            let err = ClientConfig::new(url).build_http_client().unwrap_err();
            assert!(matches!(err, crate::error::ClientError::Config(_)), "{url}: {err}");
        }
        assert!(ClientConfig::new("https://api.test/").build_http_client().is_ok());
    }

    #[test]
    fn default_points_at_local_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(config.session_dir.is_none());
        assert_eq!(config.stale_policy, StalePolicy::DiscardStale);
    }
}
