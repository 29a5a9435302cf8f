//! Quote source trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// A source of single-symbol quotes.
///
/// Implemented by the live [`AlphaVantageClient`](super::AlphaVantageClient)
/// and by the synthetic [`SyntheticMarket`](crate::fallback::SyntheticMarket)
/// dataset, so callers and the batch fetcher can swap one for the other when
/// the upstream is unavailable.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the latest quote for a symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
