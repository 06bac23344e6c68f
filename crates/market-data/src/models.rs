use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Latest market data quote for a symbol.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Timestamp of the quote.
    pub timestamp: DateTime<Utc>,

    /// Closing/current price.
    pub close: Decimal,

    /// Quote currency.
    pub currency: String,

    /// Source of the quote (YAHOO, FIXED, etc.).
    pub source: String,
}

impl Quote {
    pub fn new(timestamp: DateTime<Utc>, close: Decimal, currency: String, source: String) -> Self {
        Self {
            timestamp,
            close,
            currency,
            source,
        }
    }
}
