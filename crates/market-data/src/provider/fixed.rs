//! Fixed-price provider for tests and offline runs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

/// A provider that serves quotes from a fixed symbol -> price table.
///
/// Unknown symbols fail with `SymbolNotFound`, which makes this double useful
/// for exercising the per-row price-unavailable path.
#[derive(Default)]
pub struct FixedPriceProvider {
    prices: HashMap<String, Decimal>,
    currency: String,
}

impl FixedPriceProvider {
    pub fn new(prices: HashMap<String, Decimal>) -> Self {
        Self {
            prices,
            currency: "INR".to_string(),
        }
    }

    pub fn with_price(mut self, symbol: &str, price: Decimal) -> Self {
        self.prices.insert(symbol.to_string(), price);
        self
    }
}

#[async_trait]
impl MarketDataProvider for FixedPriceProvider {
    fn id(&self) -> &'static str {
        "FIXED"
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        match self.prices.get(symbol) {
            Some(price) => Ok(Quote::new(
                Utc::now(),
                *price,
                self.currency.clone(),
                "FIXED".to_string(),
            )),
            None => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
        }
    }
}
