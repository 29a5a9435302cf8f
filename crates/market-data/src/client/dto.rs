//! Wire-format structures for the Alpha Vantage query endpoint.
//!
//! Upstream field names are numbered strings (`"01. symbol"`,
//! `"1. open"`); each response kind decodes into a typed struct here and
//! is converted into the crate's models. A malformed payload fails typed
//! decoding instead of producing partially-populated records.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{Quote, SymbolMatch, TimeSeriesPoint};

/// Sentinel fields the provider embeds in otherwise-200 responses.
///
/// Errors and rate-limit advisories arrive in the payload, not the HTTP
/// status, so every response is checked against these before its data is
/// decoded.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(rename = "Error Message")]
    pub error_message: Option<String>,
    #[serde(rename = "Note")]
    pub note: Option<String>,
    #[serde(rename = "Information")]
    pub information: Option<String>,
}

/// `GLOBAL_QUOTE` response body.
///
/// The record is held as a raw JSON object first: the provider answers
/// unknown symbols with `"Global Quote": {}`, which must surface as
/// missing data rather than a decoding failure.
#[derive(Debug, Deserialize)]
pub(crate) struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote", default)]
    pub global_quote: Option<serde_json::Map<String, serde_json::Value>>,
}

impl GlobalQuoteResponse {
    /// Decode the quote record, treating an absent or empty record as
    /// missing data for `symbol`.
    pub fn into_record(self, symbol: &str) -> Result<GlobalQuoteRecord, MarketDataError> {
        let record = self
            .global_quote
            .filter(|record| !record.is_empty())
            .ok_or_else(|| MarketDataError::MissingData {
                symbol: symbol.to_string(),
            })?;
        serde_json::from_value(serde_json::Value::Object(record)).map_err(|e| {
            MarketDataError::Parse {
                message: format!("malformed Global Quote record: {}", e),
            }
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalQuoteRecord {
    #[serde(rename = "01. symbol")]
    pub symbol: String,
    #[serde(rename = "02. open")]
    pub open: String,
    #[serde(rename = "03. high")]
    pub high: String,
    #[serde(rename = "04. low")]
    pub low: String,
    #[serde(rename = "05. price")]
    pub price: String,
    #[serde(rename = "06. volume")]
    pub volume: String,
    #[serde(rename = "07. latest trading day")]
    pub latest_trading_day: String,
    #[serde(rename = "08. previous close")]
    pub previous_close: String,
    #[serde(rename = "09. change")]
    pub change: String,
    #[serde(rename = "10. change percent")]
    pub change_percent: String,
}

impl GlobalQuoteRecord {
    /// Normalize into a [`Quote`], parsing every numeric string.
    pub fn into_quote(self) -> Result<Quote, MarketDataError> {
        Ok(Quote {
            price: parse_decimal("05. price", &self.price)?,
            change: parse_decimal("09. change", &self.change)?,
            change_percent: parse_percent("10. change percent", &self.change_percent)?,
            volume: parse_volume("06. volume", &self.volume)?,
            latest_trading_day: parse_date("07. latest trading day", &self.latest_trading_day)?,
            previous_close: parse_decimal("08. previous close", &self.previous_close)?,
            open: parse_decimal("02. open", &self.open)?,
            high: parse_decimal("03. high", &self.high)?,
            low: parse_decimal("04. low", &self.low)?,
            symbol: self.symbol,
        })
    }
}

/// `TIME_SERIES_DAILY` response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)", default)]
    pub time_series: Option<HashMap<String, DailyBar>>,
}

impl TimeSeriesResponse {
    /// Normalize into a newest-first series. An absent series decodes as
    /// empty, matching the upstream contract for unknown symbols.
    pub fn into_series(self) -> Result<Vec<TimeSeriesPoint>, MarketDataError> {
        let mut points = self
            .time_series
            .unwrap_or_default()
            .into_iter()
            .map(|(date, bar)| {
                Ok(TimeSeriesPoint {
                    date: parse_date("series date", &date)?,
                    open: parse_decimal("1. open", &bar.open)?,
                    high: parse_decimal("2. high", &bar.high)?,
                    low: parse_decimal("3. low", &bar.low)?,
                    close: parse_decimal("4. close", &bar.close)?,
                    volume: parse_volume("5. volume", &bar.volume)?,
                })
            })
            .collect::<Result<Vec<_>, MarketDataError>>()?;

        points.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(points)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
    #[serde(rename = "5. volume")]
    pub volume: String,
}

/// `SYMBOL_SEARCH` response body. A missing `bestMatches` array decodes as
/// an empty result set.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "bestMatches", default)]
    pub best_matches: Vec<SearchMatchRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchMatchRecord {
    #[serde(rename = "1. symbol")]
    pub symbol: String,
    #[serde(rename = "2. name")]
    pub name: String,
    #[serde(rename = "3. type")]
    pub kind: String,
    #[serde(rename = "4. region")]
    pub region: String,
    #[serde(rename = "5. marketOpen")]
    pub market_open: String,
    #[serde(rename = "6. marketClose")]
    pub market_close: String,
    #[serde(rename = "7. timezone")]
    pub timezone: String,
    #[serde(rename = "8. currency")]
    pub currency: String,
    #[serde(rename = "9. matchScore")]
    pub match_score: String,
}

impl SearchMatchRecord {
    pub fn into_match(self) -> Result<SymbolMatch, MarketDataError> {
        Ok(SymbolMatch {
            match_score: parse_decimal("9. matchScore", &self.match_score)?,
            symbol: self.symbol,
            name: self.name,
            kind: self.kind,
            region: self.region,
            market_open: self.market_open,
            market_close: self.market_close,
            timezone: self.timezone,
            currency: self.currency,
        })
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, MarketDataError> {
    raw.trim().parse::<Decimal>().map_err(|_| MarketDataError::Parse {
        message: format!("field '{}' is not a number: {:?}", field, raw),
    })
}

/// Parse a percentage string, stripping the trailing `%` first
/// (`"0.49%"` becomes `0.49`).
fn parse_percent(field: &str, raw: &str) -> Result<Decimal, MarketDataError> {
    parse_decimal(field, raw.trim().trim_end_matches('%'))
}

fn parse_volume(field: &str, raw: &str) -> Result<u64, MarketDataError> {
    raw.trim().parse::<u64>().map_err(|_| MarketDataError::Parse {
        message: format!("field '{}' is not a volume: {:?}", field, raw),
    })
}

fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, MarketDataError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| MarketDataError::Parse {
        message: format!("field '{}' is not a date: {:?}", field, raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const GLOBAL_QUOTE_JSON: &str = r#"{
        "Global Quote": {
            "01. symbol": "AAPL",
            "02. open": "177.8000",
            "03. high": "179.1000",
            "04. low": "177.2500",
            "05. price": "178.5200",
            "06. volume": "52847392",
            "07. latest trading day": "2024-01-15",
            "08. previous close": "177.6500",
            "09. change": "0.8700",
            "10. change percent": "0.49%"
        }
    }"#;

    #[test]
    fn test_global_quote_normalization() {
        let response: GlobalQuoteResponse = serde_json::from_str(GLOBAL_QUOTE_JSON).unwrap();
        let quote = response.into_record("AAPL").unwrap().into_quote().unwrap();

        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, dec!(178.52));
        assert_eq!(quote.change, dec!(0.87));
        assert_eq!(quote.change_percent, dec!(0.49));
        assert_eq!(quote.volume, 52_847_392);
        assert_eq!(quote.open, dec!(177.80));
        assert_eq!(quote.high, dec!(179.10));
        assert_eq!(quote.low, dec!(177.25));
        assert_eq!(quote.previous_close, dec!(177.65));
        assert_eq!(
            quote.latest_trading_day,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_empty_global_quote_is_missing_data() {
        let response: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Global Quote": {}}"#).unwrap();
        let err = response.into_record("BADSYM").unwrap_err();
        assert!(matches!(
            err,
            MarketDataError::MissingData { ref symbol } if symbol == "BADSYM"
        ));
    }

    #[test]
    fn test_absent_global_quote_is_missing_data() {
        let response: GlobalQuoteResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_record("BADSYM").unwrap_err().is_missing_data());
    }

    #[test]
    fn test_negative_change_percent() {
        let mut json: serde_json::Value = serde_json::from_str(GLOBAL_QUOTE_JSON).unwrap();
        json["Global Quote"]["10. change percent"] = "-1.2345%".into();
        let response: GlobalQuoteResponse = serde_json::from_value(json).unwrap();
        let quote = response.into_record("AAPL").unwrap().into_quote().unwrap();
        assert_eq!(quote.change_percent, dec!(-1.2345));
    }

    #[test]
    fn test_non_numeric_price_fails_typed() {
        let mut json: serde_json::Value = serde_json::from_str(GLOBAL_QUOTE_JSON).unwrap();
        json["Global Quote"]["05. price"] = "n/a".into();
        let response: GlobalQuoteResponse = serde_json::from_value(json).unwrap();
        let err = response
            .into_record("AAPL")
            .unwrap()
            .into_quote()
            .unwrap_err();
        assert!(matches!(err, MarketDataError::Parse { .. }));
    }

    #[test]
    fn test_time_series_sorted_newest_first() {
        let json = r#"{
            "Time Series (Daily)": {
                "2024-01-12": {"1. open": "1", "2. high": "2", "3. low": "0.5", "4. close": "1.5", "5. volume": "100"},
                "2024-01-16": {"1. open": "2", "2. high": "3", "3. low": "1.5", "4. close": "2.5", "5. volume": "200"},
                "2024-01-15": {"1. open": "1.5", "2. high": "2.5", "3. low": "1", "4. close": "2", "5. volume": "150"}
            }
        }"#;
        let response: TimeSeriesResponse = serde_json::from_str(json).unwrap();
        let series = response.into_series().unwrap();

        let dates: Vec<String> = series.iter().map(|p| p.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-16", "2024-01-15", "2024-01-12"]);
        assert_eq!(series[0].close, dec!(2.5));
        assert_eq!(series[0].volume, 200);
    }

    #[test]
    fn test_absent_time_series_is_empty() {
        let response: TimeSeriesResponse = serde_json::from_str("{}").unwrap();
        assert!(response.into_series().unwrap().is_empty());
    }

    #[test]
    fn test_search_match_normalization() {
        let json = r#"{
            "bestMatches": [{
                "1. symbol": "SHOP.TRT",
                "2. name": "Shopify Inc",
                "3. type": "Equity",
                "4. region": "Toronto",
                "5. marketOpen": "09:30",
                "6. marketClose": "16:00",
                "7. timezone": "UTC-05",
                "8. currency": "CAD",
                "9. matchScore": "0.8571"
            }]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        let matches: Vec<SymbolMatch> = response
            .best_matches
            .into_iter()
            .map(|m| m.into_match().unwrap())
            .collect();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].symbol, "SHOP.TRT");
        assert_eq!(matches[0].currency, "CAD");
        assert_eq!(matches[0].match_score, dec!(0.8571));
    }

    #[test]
    fn test_absent_best_matches_is_empty() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.best_matches.is_empty());
    }

    #[test]
    fn test_envelope_fields() {
        let envelope: Envelope = serde_json::from_str(
            r#"{"Error Message": "Invalid API call", "Note": "call frequency"}"#,
        )
        .unwrap();
        assert_eq!(envelope.error_message.as_deref(), Some("Invalid API call"));
        assert_eq!(envelope.note.as_deref(), Some("call frequency"));
        assert!(envelope.information.is_none());
    }
}
