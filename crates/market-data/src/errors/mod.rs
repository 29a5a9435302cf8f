//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching or decoding market data.
///
/// The cache and the client never recover from these internally; every
/// failure propagates to the caller, which decides whether to substitute
/// the synthetic fallback dataset. Only the batch quote fetcher tolerates
/// per-symbol failures, by skipping the symbol.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider returned an explicit error payload (the `Error Message`
    /// field of an otherwise-200 response).
    #[error("Upstream error: {message}")]
    Upstream {
        /// The error message reported by the provider
        message: String,
    },

    /// The response was well-formed but the expected data substructure was
    /// absent or empty (e.g. no `Global Quote` record for the symbol).
    #[error("No data returned for {symbol}")]
    MissingData {
        /// The symbol or query the data was requested for
        symbol: String,
    },

    /// The provider rate limited the request at the transport level
    /// (HTTP 429). Payload-level rate-limit advisories are logged, not
    /// raised.
    #[error("Rate limited by provider")]
    RateLimited,

    /// The request to the provider timed out.
    #[error("Request timed out")]
    Timeout,

    /// The payload could not be decoded into the expected shape.
    #[error("Malformed response: {message}")]
    Parse {
        /// Description of the decoding failure
        message: String,
    },

    /// A transport-level failure other than a timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the error indicates the symbol simply has no data, as
    /// opposed to a transport or provider failure.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::MissingData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = MarketDataError::Upstream {
            message: "Invalid API call".to_string(),
        };
        assert_eq!(format!("{}", error), "Upstream error: Invalid API call");

        let error = MarketDataError::MissingData {
            symbol: "BADSYM".to_string(),
        };
        assert_eq!(format!("{}", error), "No data returned for BADSYM");

        let error = MarketDataError::RateLimited;
        assert_eq!(format!("{}", error), "Rate limited by provider");
    }

    #[test]
    fn test_is_missing_data() {
        assert!(MarketDataError::MissingData {
            symbol: "X".to_string()
        }
        .is_missing_data());
        assert!(!MarketDataError::RateLimited.is_missing_data());
    }
}
