//! Client configuration: base URL and request timeout.
//!
//! The base URL is resolved once at startup and then injected into
//! `CatalogClient`; nothing reads the environment after that.

use std::time::Duration;

use tracing::warn;

/// Origin used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "https://hypetotal.com";

/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "CATALOG_API_URL";

/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "CATALOG_API_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings shared by every call a client makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: resolve_base_url(Some(base_url)),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Build from `CATALOG_API_URL` / `CATALOG_API_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV).ok();
        let timeout = std::env::var(TIMEOUT_ENV).ok();
        Self::from_values(base_url.as_deref(), timeout.as_deref())
    }

    fn from_values(base_url: Option<&str>, timeout_secs: Option<&str>) -> Self {
        let timeout = match timeout_secs.map(str::trim).filter(|s| !s.is_empty()) {
            None => Some(DEFAULT_TIMEOUT),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) => timeout_from_secs(secs),
                Err(e) => {
                    warn!(value = raw, error = %e, "ignoring invalid {TIMEOUT_ENV}");
                    Some(DEFAULT_TIMEOUT)
                }
            },
        };
        Self {
            base_url: resolve_base_url(base_url),
            timeout,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }
}

/// Whole seconds to a timeout; 0 disables it.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Pick the override when it is non-blank, else the default, and strip
/// trailing slashes.
pub fn resolve_base_url(override_url: Option<&str>) -> String {
    let raw = override_url
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL);
    raw.trim_end_matches('/').to_string()
}
