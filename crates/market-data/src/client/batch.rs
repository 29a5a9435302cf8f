//! Sequential multi-symbol quote fetching.

use std::time::Duration;

use log::warn;

use crate::client::QuoteSource;
use crate::models::Quote;

/// Fetch quotes for several symbols, one at a time, best-effort.
///
/// Symbols are dispatched strictly in input order and never concurrently;
/// after every attempt (success or failure) the task sleeps `delay` to stay
/// under the upstream's requests-per-minute quota. A failed symbol is
/// logged and skipped, so the result holds `0..=symbols.len()` quotes and
/// callers must correlate by the `symbol` field, not by position. An empty
/// result is a valid output; deciding whether "no data" warrants fallback
/// substitution is the caller's concern.
pub async fn fetch_quotes<S>(source: &S, symbols: &[String], delay: Duration) -> Vec<Quote>
where
    S: QuoteSource + ?Sized,
{
    let mut quotes = Vec::with_capacity(symbols.len());

    for symbol in symbols {
        match source.quote(symbol).await {
            Ok(quote) => quotes.push(quote),
            Err(e) => {
                warn!("Skipping quote for {}: {}", symbol, e);
            }
        }
        tokio::time::sleep(delay).await;
    }

    quotes
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use crate::errors::MarketDataError;

    fn quote_for(symbol: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            price: dec!(100),
            change: dec!(1),
            change_percent: dec!(1.01),
            volume: 1_000,
            open: dec!(99),
            high: dec!(101),
            low: dec!(98),
            previous_close: dec!(99),
            latest_trading_day: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    /// In-memory source: known symbols succeed, everything else is missing.
    struct FixedSource {
        known: HashMap<String, Quote>,
        calls: AtomicUsize,
    }

    impl FixedSource {
        fn new(symbols: &[&str]) -> Self {
            Self {
                known: symbols
                    .iter()
                    .map(|s| (s.to_string(), quote_for(s)))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl QuoteSource for FixedSource {
        async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.known
                .get(symbol)
                .cloned()
                .ok_or_else(|| MarketDataError::MissingData {
                    symbol: symbol.to_string(),
                })
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_skipped_not_represented() {
        let source = FixedSource::new(&["AAPL", "MSFT"]);
        let result = fetch_quotes(
            &source,
            &symbols(&["AAPL", "BADSYM", "MSFT"]),
            Duration::from_millis(200),
        )
        .await;

        let got: Vec<&str> = result.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(got, ["AAPL", "MSFT"]);
        // Every symbol was attempted, including the failing one
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failures_yield_empty_result() {
        let source = FixedSource::new(&[]);
        let result = fetch_quotes(
            &source,
            &symbols(&["X", "Y"]),
            Duration::from_millis(200),
        )
        .await;
        assert!(result.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_order_and_duplicates_follow_input() {
        let source = FixedSource::new(&["AAPL", "MSFT"]);
        let result = fetch_quotes(
            &source,
            &symbols(&["MSFT", "AAPL", "MSFT"]),
            Duration::ZERO,
        )
        .await;
        let got: Vec<&str> = result.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(got, ["MSFT", "AAPL", "MSFT"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_result_never_longer_than_input() {
        let source = FixedSource::new(&["AAPL"]);
        let input = symbols(&["AAPL", "AAPL", "NOPE"]);
        let result = fetch_quotes(&source, &input, Duration::ZERO).await;
        assert!(result.len() <= input.len());
        assert!(result.iter().all(|q| input.contains(&q.symbol)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_separates_dispatches() {
        let source = FixedSource::new(&["AAPL", "MSFT", "NVDA"]);
        let start = tokio::time::Instant::now();
        fetch_quotes(
            &source,
            &symbols(&["AAPL", "MSFT", "NVDA"]),
            Duration::from_millis(200),
        )
        .await;
        // Paused clock advances only through the sleeps: three attempts,
        // 200ms after each
        assert!(start.elapsed() >= Duration::from_millis(600));
    }
}
