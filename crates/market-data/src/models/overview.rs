use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Company fundamentals from the `OVERVIEW` endpoint.
///
/// The upstream passes every metric through as a string (including numeric
/// fields like `MarketCapitalization`), so this is a free-form mapping of
/// metric name to raw value. Consumers parse the metrics they care about on
/// demand via [`metric_decimal`](Self::metric_decimal).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
    fields: HashMap<String, String>,
}

impl CompanyOverview {
    /// Build an overview from raw upstream fields. Sentinel envelope fields
    /// must already be stripped by the caller.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Ticker symbol the overview refers to.
    pub fn symbol(&self) -> Option<&str> {
        self.get("Symbol")
    }

    /// Raw string value of a metric, as delivered by the upstream.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Parse a metric as a decimal number.
    ///
    /// Returns `None` for absent metrics and for the upstream's
    /// "no value" placeholders (`"None"`, `"-"`, empty string).
    pub fn metric_decimal(&self, name: &str) -> Option<Decimal> {
        self.get(name)
            .filter(|v| !v.is_empty() && *v != "None" && *v != "-")
            .and_then(|v| v.parse::<Decimal>().ok())
    }

    /// Number of metrics present.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the overview carries no metrics at all.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all metric name/value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
