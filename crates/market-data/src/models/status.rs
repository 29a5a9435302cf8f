//! Market open/closed state.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// US equity market timezone; the open/closed rule is evaluated against
/// New York wall-clock time.
const MARKET_TZ: Tz = chrono_tz::America::New_York;

/// Whether the US equity market is open at the given instant.
///
/// Open Monday through Friday, 9:00 to 16:00 New York time. Holidays are
/// not modeled; this is a display heuristic, not a trading calendar.
pub(crate) fn market_hours_open(instant: DateTime<Utc>) -> bool {
    let ny = instant.with_timezone(&MARKET_TZ);
    let is_weekday = !matches!(ny.weekday(), Weekday::Sat | Weekday::Sun);
    let is_market_hours = (9..16).contains(&ny.hour());
    is_weekday && is_market_hours
}

/// Market open/closed snapshot, recomputed from the local wall clock each
/// time the status operation runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketStatus {
    /// Whether the market is currently open
    pub is_open: bool,

    /// The instant the open/closed rule was evaluated for
    pub current_time: DateTime<Utc>,

    /// When this snapshot was produced
    pub last_updated: DateTime<Utc>,
}

impl MarketStatus {
    /// Compute the status for the given instant.
    pub fn compute(now: DateTime<Utc>) -> Self {
        Self {
            is_open: market_hours_open(now),
            current_time: now,
            last_updated: now,
        }
    }
}
