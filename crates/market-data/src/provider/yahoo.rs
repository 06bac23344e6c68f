//! Yahoo Finance market data provider.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use log::warn;
use rust_decimal::Decimal;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

const PROVIDER_ID: &str = "YAHOO";

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    currency: String,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    ///
    /// `currency` is the quote currency reported for this deployment's
    /// exchange (Yahoo quotes NSE symbols in INR).
    pub fn new(currency: &str) -> Result<Self, MarketDataError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to initialize Yahoo connector: {}", e),
        })?;
        Ok(Self {
            connector,
            currency: currency.to_string(),
        })
    }

    /// Convert a Yahoo quote to our Quote model.
    fn yahoo_quote_to_quote(&self, yahoo_quote: yahoo::Quote) -> Result<Quote, MarketDataError> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid timestamp: {}", yahoo_quote.timestamp),
            })?;

        let close = Decimal::from_f64_retain(yahoo_quote.close)
            .filter(|c| c.is_sign_positive() && !c.is_zero())
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("Invalid close price: {}", yahoo_quote.close),
            })?;

        Ok(Quote::new(
            timestamp,
            close,
            self.currency.clone(),
            PROVIDER_ID.to_string(),
        ))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: PROVIDER_ID.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let yahoo_quote = response.last_quote().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::SymbolNotFound(symbol.to_string())
        })?;

        self.yahoo_quote_to_quote(yahoo_quote)
    }
}
