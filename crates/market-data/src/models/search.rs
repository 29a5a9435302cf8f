//! Search result models for symbol lookup.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single match from a `SYMBOL_SEARCH` query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolMatch {
    /// Symbol/ticker (e.g. "AAPL", "SHOP.TRT")
    pub symbol: String,

    /// Display name (e.g. "Apple Inc")
    pub name: String,

    /// Instrument kind reported by the provider (e.g. "Equity", "ETF")
    pub kind: String,

    /// Listing region (e.g. "United States")
    pub region: String,

    /// Local market open time (e.g. "09:30")
    pub market_open: String,

    /// Local market close time (e.g. "16:00")
    pub market_close: String,

    /// Listing timezone (e.g. "UTC-04")
    pub timezone: String,

    /// Trading currency (e.g. "USD")
    pub currency: String,

    /// Relevance score from the provider, higher is a better match
    pub match_score: Decimal,
}
