//! Market data models
//!
//! This module contains the core data types returned by the client:
//! - `quote` - Point-in-time price/volume snapshot (Quote)
//! - `series` - Daily OHLCV history (TimeSeriesPoint)
//! - `overview` - Company fundamentals as pass-through metrics (CompanyOverview)
//! - `search` - Symbol search matches (SymbolMatch)
//! - `status` - Market open/closed state (MarketStatus)
//! - `meta` - Static symbol/sector tables (StockMeta)

mod meta;
mod overview;
mod quote;
mod search;
mod series;
mod status;

pub use meta::{StockMeta, MARKET_INDICES, POPULAR_STOCKS};
pub use overview::CompanyOverview;
pub use quote::Quote;
pub use search::SymbolMatch;
pub use series::TimeSeriesPoint;
pub use status::MarketStatus;
