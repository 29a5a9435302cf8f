//! Client configuration.

use std::env;
use std::time::Duration;

use crate::cache::DEFAULT_CACHE_TTL;

/// Environment variable holding the Alpha Vantage API credential.
pub const API_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Demo-tier credential used when no key is configured. It works, but with
/// materially lower rate limits than a registered key.
pub const DEMO_API_KEY: &str = "demo";

/// Production query endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Delay between consecutive requests in a batch fetch, tuned for the free
/// tier's requests-per-minute quota.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(200);

/// Total per-request timeout applied to every HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`AlphaVantageClient`](crate::client::AlphaVantageClient).
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// API credential sent as the `apikey` query parameter.
    pub api_key: String,

    /// Endpoint to send queries to. Overridable for tests.
    pub base_url: String,

    /// Validity window for cached responses.
    pub cache_ttl: Duration,

    /// Fixed delay between consecutive requests in a batch fetch.
    pub request_delay: Duration,

    /// Total timeout for a single HTTP request.
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Build a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: DEFAULT_CACHE_TTL,
            request_delay: DEFAULT_REQUEST_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Read the API key from `ALPHA_VANTAGE_API_KEY`, falling back to the
    /// demo credential when absent or empty.
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or_else(|| DEMO_API_KEY.to_string());
        Self::new(api_key)
    }

    /// Override the query endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the cache validity window.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Override the inter-request delay used by batch fetches.
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Override the per-request HTTP timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::new("key");
        assert_eq!(config.api_key, "key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.request_delay, Duration::from_millis(200));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ApiConfig::new("key")
            .with_base_url("http://127.0.0.1:9999")
            .with_cache_ttl(Duration::from_secs(1))
            .with_request_delay(Duration::ZERO)
            .with_request_timeout(Duration::from_millis(100));
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.cache_ttl, Duration::from_secs(1));
        assert_eq!(config.request_delay, Duration::ZERO);
        assert_eq!(config.request_timeout, Duration::from_millis(100));
    }
}
