//! Locally generated synthetic market data.
//!
//! Dashboard callers substitute this dataset when a fetch sequence fails
//! entirely; the client itself never performs the substitution. Prices
//! follow a random walk around a per-symbol base price, so repeated calls
//! for the same symbol stay in a plausible range even though individual
//! bars are random.

use async_trait::async_trait;
use chrono::{Days, Utc};
use rand::Rng;
use rust_decimal::Decimal;

use crate::client::QuoteSource;
use crate::errors::MarketDataError;
use crate::models::{Quote, TimeSeriesPoint};

/// Days of history generated when callers don't ask for a specific span.
pub const DEFAULT_HISTORY_DAYS: usize = 30;

/// Stable per-symbol base price in the 50..1050 range.
fn base_price(symbol: &str) -> f64 {
    let hash: u32 = symbol
        .bytes()
        .fold(17_u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    50.0 + (hash % 1000) as f64
}

fn to_price(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default().round_dp(2)
}

/// Generate a random-walk daily series for a symbol, newest-first.
///
/// Each bar opens at the previous close, the close moves by a random
/// fraction of the volatility, and the high/low envelope always contains
/// both open and close. Prices are floored at 1.
pub fn synthetic_time_series(symbol: &str, days: usize) -> Vec<TimeSeriesPoint> {
    let mut rng = rand::thread_rng();
    let volatility: f64 = rng.gen_range(0.01..0.06);
    let today = Utc::now().date_naive();

    let mut points = Vec::with_capacity(days);
    let mut close = base_price(symbol);

    for i in (0..days).rev() {
        let date = today - Days::new(i as u64);
        let open = close;
        let drift = (rng.gen::<f64>() - 0.5) * volatility * open;
        close = (open + drift).max(1.0);

        let high = open.max(close) * (1.0 + rng.gen::<f64>() * volatility);
        let low = (open.min(close) * (1.0 - rng.gen::<f64>() * volatility)).max(0.5);
        let volume = rng.gen_range(1_000_000..11_000_000);

        points.push(TimeSeriesPoint {
            date,
            open: to_price(open),
            high: to_price(high),
            low: to_price(low),
            close: to_price(close),
            volume,
        });
    }

    points.reverse();
    points
}

/// Derive a synthetic quote from the last two steps of a fresh walk.
pub fn synthetic_quote(symbol: &str) -> Quote {
    let series = synthetic_time_series(symbol, DEFAULT_HISTORY_DAYS);
    // DEFAULT_HISTORY_DAYS >= 2, so both bars exist
    let latest = &series[0];
    let previous = &series[1];

    let change = latest.close - previous.close;
    let change_percent = if previous.close.is_zero() {
        Decimal::ZERO
    } else {
        (change / previous.close * Decimal::from(100)).round_dp(2)
    };

    Quote {
        symbol: symbol.to_string(),
        price: latest.close,
        change,
        change_percent,
        volume: latest.volume,
        open: latest.open,
        high: latest.high,
        low: latest.low,
        previous_close: previous.close,
        latest_trading_day: latest.date,
    }
}

/// Infallible [`QuoteSource`] backed by the synthetic walk, interchangeable
/// with the live client at the trait seam.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyntheticMarket;

#[async_trait]
impl QuoteSource for SyntheticMarket {
    async fn quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        Ok(synthetic_quote(symbol))
    }
}
