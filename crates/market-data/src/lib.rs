//! Marketdash Market Data Crate
//!
//! This crate is the data-access core of the marketdash dashboard: a
//! cached, rate-limit-aware client for the Alpha Vantage quote API, plus
//! a synthetic fallback dataset for when the upstream is unavailable.
//!
//! # Overview
//!
//! The crate supports:
//! - Latest quotes, daily time series, company overviews, symbol search,
//!   and a market open/closed probe
//! - A shared time-boxed response cache consulted before every request
//! - Sequential multi-symbol fetching with a fixed inter-request delay to
//!   respect the upstream's requests-per-minute quota
//! - A random-walk synthetic dataset, interchangeable with the live
//!   client at the [`QuoteSource`] seam
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |   Dashboard UI   | --> |  fetch_quotes    |  (sequential, best-effort)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | AlphaVantage     |  (one GET per cache miss)
//!                          | Client           |
//!                          +------------------+
//!                             |           |
//!                             v           v
//!                     +-----------+  +------------+
//!                     | QuoteCache|  | Upstream   |
//!                     | (5 min)   |  | HTTP API   |
//!                     +-----------+  +------------+
//! ```
//!
//! Every failure propagates to the caller, which may substitute
//! [`fallback`] data; the client never retries and never serves stale
//! cache entries.

pub mod cache;
pub mod client;
pub mod config;
pub mod errors;
pub mod fallback;
pub mod models;

// Re-export the error type
pub use errors::MarketDataError;

// Re-export all public types from models
pub use models::{
    CompanyOverview, MarketStatus, Quote, StockMeta, SymbolMatch, TimeSeriesPoint,
    MARKET_INDICES, POPULAR_STOCKS,
};

// Re-export cache types
pub use cache::{CacheKey, CachedValue, QuoteCache, DEFAULT_CACHE_TTL};

// Re-export client types
pub use client::{fetch_quotes, AlphaVantageClient, ApiFunction, QuoteSource};

// Re-export configuration
pub use config::ApiConfig;

// Re-export fallback types
pub use fallback::{synthetic_quote, synthetic_time_series, SyntheticMarket};
