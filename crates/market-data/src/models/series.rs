use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar from a `TIME_SERIES_DAILY` response.
///
/// Series are returned sorted newest-first, one point per calendar
/// trading day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Trading day
    pub date: NaiveDate,

    /// Opening price
    pub open: Decimal,

    /// Session high
    pub high: Decimal,

    /// Session low
    pub low: Decimal,

    /// Closing price
    pub close: Decimal,

    /// Trading volume
    pub volume: u64,
}
