//! Static symbol metadata used by dashboard callers.

use serde::Serialize;

/// Fixed symbol/name/sector metadata for a listed instrument.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StockMeta {
    /// Ticker symbol
    pub symbol: &'static str,
    /// Company or index name
    pub name: &'static str,
    /// Sector classification, empty for indices
    pub sector: &'static str,
}

/// Popular large-cap symbols shown by default in watchlists.
pub static POPULAR_STOCKS: &[StockMeta] = &[
    StockMeta { symbol: "AAPL", name: "Apple Inc.", sector: "Technology" },
    StockMeta { symbol: "MSFT", name: "Microsoft Corporation", sector: "Technology" },
    StockMeta { symbol: "GOOGL", name: "Alphabet Inc.", sector: "Technology" },
    StockMeta { symbol: "AMZN", name: "Amazon.com Inc.", sector: "Consumer Cyclical" },
    StockMeta { symbol: "META", name: "Meta Platforms Inc.", sector: "Technology" },
    StockMeta { symbol: "TSLA", name: "Tesla Inc.", sector: "Consumer Cyclical" },
    StockMeta { symbol: "NVDA", name: "NVIDIA Corporation", sector: "Technology" },
    StockMeta { symbol: "NFLX", name: "Netflix Inc.", sector: "Communication Services" },
    StockMeta { symbol: "PYPL", name: "PayPal Holdings Inc.", sector: "Financial Services" },
    StockMeta { symbol: "INTC", name: "Intel Corporation", sector: "Technology" },
    StockMeta { symbol: "AMD", name: "Advanced Micro Devices Inc.", sector: "Technology" },
    StockMeta { symbol: "CRM", name: "Salesforce Inc.", sector: "Technology" },
    StockMeta { symbol: "CSCO", name: "Cisco Systems Inc.", sector: "Technology" },
    StockMeta { symbol: "ADBE", name: "Adobe Inc.", sector: "Technology" },
    StockMeta { symbol: "ORCL", name: "Oracle Corporation", sector: "Technology" },
];

/// Index-tracking ETFs used as market barometers.
pub static MARKET_INDICES: &[StockMeta] = &[
    StockMeta { symbol: "SPY", name: "S&P 500", sector: "" },
    StockMeta { symbol: "DIA", name: "Dow Jones", sector: "" },
    StockMeta { symbol: "QQQ", name: "Nasdaq", sector: "" },
    StockMeta { symbol: "IWM", name: "Russell 2000", sector: "" },
    StockMeta { symbol: "VGK", name: "FTSE Europe", sector: "" },
    StockMeta { symbol: "EWJ", name: "Nikkei 225", sector: "" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_no_duplicate_symbols() {
        let mut symbols: Vec<&str> = POPULAR_STOCKS
            .iter()
            .chain(MARKET_INDICES.iter())
            .map(|s| s.symbol)
            .collect();
        let len = symbols.len();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), len);
    }

    #[test]
    fn test_popular_stocks_have_sectors() {
        assert!(POPULAR_STOCKS.iter().all(|s| !s.sector.is_empty()));
        assert!(MARKET_INDICES.iter().all(|s| s.sector.is_empty()));
    }
}
