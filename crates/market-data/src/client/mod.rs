//! Alpha Vantage request client.
//!
//! One operation per upstream function kind, each backed by the shared
//! [`QuoteCache`]: a hit returns the cached value with no I/O, a miss
//! issues exactly one GET, normalizes the payload, and writes the result
//! back before returning. Failures always propagate; substituting fallback
//! data is the caller's decision.
//!
//! The provider signals errors and rate-limit advisories through sentinel
//! fields inside otherwise-200 responses, so the client inspects payload
//! content rather than HTTP status to detect failure.

mod batch;
mod dto;
mod traits;

pub use batch::fetch_quotes;
pub use traits::QuoteSource;

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::cache::{CacheKey, CachedValue, QuoteCache};
use crate::config::ApiConfig;
use crate::errors::MarketDataError;
use crate::models::{CompanyOverview, MarketStatus, Quote, SymbolMatch, TimeSeriesPoint};
use dto::{Envelope, GlobalQuoteResponse, SearchResponse, TimeSeriesResponse};

/// Symbol used as a proxy when probing overall market state.
const REFERENCE_SYMBOL: &str = "SPY";

/// Upstream operation kinds, sent as the `function` query parameter.
///
/// A closed enum instead of free-form strings; a typo here is a compile
/// error, not a silent empty response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiFunction {
    /// Daily OHLCV history
    TimeSeriesDaily,
    /// Company fundamentals
    Overview,
    /// Latest quote snapshot
    GlobalQuote,
    /// Keyword symbol search
    SymbolSearch,
}

impl ApiFunction {
    /// The wire value for the `function` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Self::Overview => "OVERVIEW",
            Self::GlobalQuote => "GLOBAL_QUOTE",
            Self::SymbolSearch => "SYMBOL_SEARCH",
        }
    }
}

/// HTTP client for the Alpha Vantage query endpoint.
pub struct AlphaVantageClient {
    http: Client,
    config: ApiConfig,
    cache: QuoteCache,
}

impl AlphaVantageClient {
    /// Create a client with the given configuration.
    pub fn new(config: ApiConfig) -> Self {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        let cache = QuoteCache::with_ttl(config.cache_ttl);

        Self {
            http,
            config,
            cache,
        }
    }

    /// Create a client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// The active configuration.
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Perform one GET for the given operation and return the raw payload.
    ///
    /// Payload sentinels are checked here: an `Error Message` field fails
    /// the request, while `Note`/`Information` advisories (the provider's
    /// rate-limit warnings) are logged and processing continues with
    /// whatever data is present.
    async fn fetch_payload(
        &self,
        function: ApiFunction,
        params: &[(&str, &str)],
    ) -> Result<String, MarketDataError> {
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("function", function.as_str()));
        query.push(("apikey", &self.config.api_key));

        let url = reqwest::Url::parse_with_params(&self.config.base_url, &query).map_err(|e| {
            MarketDataError::Parse {
                message: format!("failed to build request URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
            redact_credential(url.as_str(), &self.config.api_key)
        );

        let response = self.http.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !status.is_success() {
            return Err(MarketDataError::Upstream {
                message: format!("HTTP {}", status),
            });
        }

        let text = response.text().await.map_err(MarketDataError::Network)?;

        let envelope: Envelope = serde_json::from_str(&text).unwrap_or_default();
        if let Some(message) = envelope.error_message {
            return Err(MarketDataError::Upstream { message });
        }
        if let Some(note) = envelope.note {
            warn!("Alpha Vantage advisory: {}", note);
        }
        if let Some(information) = envelope.information {
            warn!("Alpha Vantage advisory: {}", information);
        }

        Ok(text)
    }

    fn decode<T: DeserializeOwned>(text: &str) -> Result<T, MarketDataError> {
        serde_json::from_str(text).map_err(|e| MarketDataError::Parse {
            message: format!("failed to decode response: {}", e),
        })
    }

    /// Fetch the latest quote for a symbol.
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let key = CacheKey::Quote(symbol.to_string());
        if let Some(quote) = self.cache.get(&key).and_then(CachedValue::into_quote) {
            debug!("Cache hit for {}", key);
            return Ok(quote);
        }

        let text = self
            .fetch_payload(ApiFunction::GlobalQuote, &[("symbol", symbol)])
            .await?;
        let response: GlobalQuoteResponse = Self::decode(&text)?;
        let quote = response.into_record(symbol)?.into_quote()?;

        self.cache.put(key, CachedValue::Quote(quote.clone()));
        Ok(quote)
    }

    /// Fetch the daily time series for a symbol, newest-first.
    ///
    /// An unknown symbol yields an empty series, not an error.
    pub async fn get_time_series(
        &self,
        symbol: &str,
    ) -> Result<Vec<TimeSeriesPoint>, MarketDataError> {
        let key = CacheKey::TimeSeries(symbol.to_string());
        if let Some(series) = self.cache.get(&key).and_then(CachedValue::into_series) {
            debug!("Cache hit for {}", key);
            return Ok(series);
        }

        let text = self
            .fetch_payload(
                ApiFunction::TimeSeriesDaily,
                &[("symbol", symbol), ("outputsize", "full")],
            )
            .await?;
        let response: TimeSeriesResponse = Self::decode(&text)?;
        let series = response.into_series()?;

        self.cache.put(key, CachedValue::Series(series.clone()));
        Ok(series)
    }

    /// Fetch company fundamentals for a symbol.
    ///
    /// Metrics pass through as strings; an empty payload (the provider's
    /// answer for unknown symbols) is missing data.
    pub async fn get_company_overview(
        &self,
        symbol: &str,
    ) -> Result<CompanyOverview, MarketDataError> {
        let key = CacheKey::Overview(symbol.to_string());
        if let Some(overview) = self.cache.get(&key).and_then(CachedValue::into_overview) {
            debug!("Cache hit for {}", key);
            return Ok(overview);
        }

        let text = self
            .fetch_payload(ApiFunction::Overview, &[("symbol", symbol)])
            .await?;
        let raw: serde_json::Map<String, serde_json::Value> = Self::decode(&text)?;

        let fields: HashMap<String, String> = raw
            .into_iter()
            .filter(|(name, _)| !matches!(name.as_str(), "Error Message" | "Note" | "Information"))
            .map(|(name, value)| match value {
                serde_json::Value::String(s) => (name, s),
                other => (name, other.to_string()),
            })
            .collect();

        if !fields.contains_key("Symbol") {
            return Err(MarketDataError::MissingData {
                symbol: symbol.to_string(),
            });
        }
        let overview = CompanyOverview::from_fields(fields);

        self.cache.put(key, CachedValue::Overview(overview.clone()));
        Ok(overview)
    }

    /// Search for symbols matching a keyword string.
    pub async fn search_symbols(
        &self,
        keywords: &str,
    ) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let key = CacheKey::Search(keywords.to_string());
        if let Some(matches) = self.cache.get(&key).and_then(CachedValue::into_search) {
            debug!("Cache hit for {}", key);
            return Ok(matches);
        }

        let text = self
            .fetch_payload(ApiFunction::SymbolSearch, &[("keywords", keywords)])
            .await?;
        let response: SearchResponse = Self::decode(&text)?;
        let matches = response
            .best_matches
            .into_iter()
            .map(|m| m.into_match())
            .collect::<Result<Vec<_>, _>>()?;

        self.cache.put(key, CachedValue::Search(matches.clone()));
        Ok(matches)
    }

    /// Probe whether the market is open.
    ///
    /// Issues a reference quote request for SPY to confirm the upstream is
    /// reachable, then evaluates the New York wall-clock rule.
    pub async fn get_market_status(&self) -> Result<MarketStatus, MarketDataError> {
        let key = CacheKey::MarketStatus;
        if let Some(status) = self.cache.get(&key).and_then(CachedValue::into_status) {
            debug!("Cache hit for {}", key);
            return Ok(status);
        }

        // Only the envelope matters here; the quote body is not inspected.
        self.fetch_payload(ApiFunction::GlobalQuote, &[("symbol", REFERENCE_SYMBOL)])
            .await?;
        let status = MarketStatus::compute(Utc::now());

        self.cache.put(key, CachedValue::Status(status.clone()));
        Ok(status)
    }

    /// Fetch quotes for several symbols sequentially, best-effort, with
    /// the configured inter-request delay. See [`fetch_quotes`].
    pub async fn get_quotes(&self, symbols: &[String]) -> Vec<Quote> {
        fetch_quotes(self, symbols, self.config.request_delay).await
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageClient {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        self.get_quote(symbol).await
    }
}

/// Mask the API credential in a URL destined for the logs.
///
/// An empty key is left alone: replacing an empty pattern would insert the
/// mask between every character of the URL.
fn redact_credential(url: &str, api_key: &str) -> String {
    if api_key.is_empty() {
        url.to_string()
    } else {
        url.replace(api_key, "***")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_wire_values() {
        assert_eq!(ApiFunction::TimeSeriesDaily.as_str(), "TIME_SERIES_DAILY");
        assert_eq!(ApiFunction::Overview.as_str(), "OVERVIEW");
        assert_eq!(ApiFunction::GlobalQuote.as_str(), "GLOBAL_QUOTE");
        assert_eq!(ApiFunction::SymbolSearch.as_str(), "SYMBOL_SEARCH");
    }

    #[test]
    fn test_credential_redaction() {
        let url = "https://example.com/query?symbol=AAPL&apikey=secret";
        assert_eq!(
            redact_credential(url, "secret"),
            "https://example.com/query?symbol=AAPL&apikey=***"
        );
        // An empty key must not mangle the URL
        assert_eq!(redact_credential(url, ""), url);
    }
}
