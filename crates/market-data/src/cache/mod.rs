//! Time-boxed response cache.
//!
//! Every client operation consults this cache before issuing a request and
//! writes its normalized result back on success. Entries are valid for a
//! fixed window (5 minutes by default); a stale or absent entry is a miss,
//! never a silently served stale value. Entries are only ever replaced
//! wholesale, so concurrent writers get last-writer-wins semantics. Nothing
//! is proactively evicted: the key space is bounded by
//! (operation kind x symbol), which stays small for a dashboard session.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::warn;

use crate::models::{CompanyOverview, MarketStatus, Quote, SymbolMatch, TimeSeriesPoint};

/// Validity window applied when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Composite cache key: operation kind plus symbol or search keyword.
///
/// A closed enum rather than a formatted string, so a typo in an operation
/// name cannot silently split the cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Daily time series for a symbol
    TimeSeries(String),
    /// Company overview for a symbol
    Overview(String),
    /// Latest quote for a symbol
    Quote(String),
    /// Symbol search for a keyword string
    Search(String),
    /// Global market open/closed status
    MarketStatus,
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeSeries(symbol) => write!(f, "timeseries-{}", symbol),
            Self::Overview(symbol) => write!(f, "overview-{}", symbol),
            Self::Quote(symbol) => write!(f, "quote-{}", symbol),
            Self::Search(keywords) => write!(f, "search-{}", keywords),
            Self::MarketStatus => write!(f, "market-status"),
        }
    }
}

/// A cached, normalized response payload.
#[derive(Clone, Debug, PartialEq)]
pub enum CachedValue {
    /// Normalized latest quote
    Quote(Quote),
    /// Daily series, newest-first
    Series(Vec<TimeSeriesPoint>),
    /// Company fundamentals
    Overview(CompanyOverview),
    /// Symbol search matches
    Search(Vec<SymbolMatch>),
    /// Market open/closed snapshot
    Status(MarketStatus),
}

impl CachedValue {
    /// Extract a quote, if this value holds one.
    pub fn into_quote(self) -> Option<Quote> {
        match self {
            Self::Quote(quote) => Some(quote),
            _ => None,
        }
    }

    /// Extract a series, if this value holds one.
    pub fn into_series(self) -> Option<Vec<TimeSeriesPoint>> {
        match self {
            Self::Series(series) => Some(series),
            _ => None,
        }
    }

    /// Extract an overview, if this value holds one.
    pub fn into_overview(self) -> Option<CompanyOverview> {
        match self {
            Self::Overview(overview) => Some(overview),
            _ => None,
        }
    }

    /// Extract search matches, if this value holds them.
    pub fn into_search(self) -> Option<Vec<SymbolMatch>> {
        match self {
            Self::Search(matches) => Some(matches),
            _ => None,
        }
    }

    /// Extract a market status, if this value holds one.
    pub fn into_status(self) -> Option<MarketStatus> {
        match self {
            Self::Status(status) => Some(status),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
struct CacheEntry {
    value: CachedValue,
    fetched_at: Instant,
}

/// Shared response cache with time-boxed validity.
///
/// Reads and writes go through a `Mutex` so the cache stays sound on a
/// multi-threaded runtime while keeping the last-writer-wins behavior of
/// the single-threaded original.
pub struct QuoteCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    ttl: Duration,
}

impl QuoteCache {
    /// Create a cache with the default 5-minute validity window.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Create a cache with a custom validity window.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// Lock the entry map, recovering from poison if necessary.
    ///
    /// Worst case after recovery is a missing or doubly-fetched entry,
    /// which the freshness check already tolerates.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| {
            warn!("Quote cache mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Fetch a value if a fresh entry exists.
    ///
    /// Returns `None` both for absent keys and for entries older than the
    /// validity window; callers must treat either as a miss and re-fetch.
    pub fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let entries = self.lock_entries();
        let entry = entries.get(key)?;
        if entry.fetched_at.elapsed() < self.ttl {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    /// Store a value, overwriting any existing entry with a fresh timestamp.
    pub fn put(&self, key: CacheKey, value: CachedValue) {
        let mut entries = self.lock_entries();
        entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Number of entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// Rewind an entry's fetch timestamp, for expiry tests.
    #[cfg(test)]
    fn age_entry(&self, key: &CacheKey, by: Duration) {
        let mut entries = self.lock_entries();
        if let Some(entry) = entries.get_mut(key) {
            entry.fetched_at -= by;
        }
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}
