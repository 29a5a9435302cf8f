use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single point-in-time price/volume snapshot for a symbol.
///
/// Constructed from a normalized `GLOBAL_QUOTE` response and immutable
/// afterwards; every field is derived from the upstream payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol (e.g. "AAPL")
    pub symbol: String,

    /// Latest price
    pub price: Decimal,

    /// Absolute change versus the previous close
    pub change: Decimal,

    /// Percent change versus the previous close, already stripped of the
    /// upstream trailing `%` (e.g. `0.49` for "0.49%")
    pub change_percent: Decimal,

    /// Trading volume for the latest trading day
    pub volume: u64,

    /// Opening price of the latest trading day
    pub open: Decimal,

    /// High of the latest trading day
    pub high: Decimal,

    /// Low of the latest trading day
    pub low: Decimal,

    /// Previous session's closing price
    pub previous_close: Decimal,

    /// The trading day this quote refers to
    pub latest_trading_day: NaiveDate,
}
