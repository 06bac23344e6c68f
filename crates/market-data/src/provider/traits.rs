//! Market data provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new price source. The symbol
/// passed in is already normalized and lookup-ready (see [`crate::symbol`]).
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider, used in logs and quote sources.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a symbol.
    ///
    /// Returns a per-symbol [`MarketDataError`] on failure; callers are
    /// expected to treat any failure as "price unavailable" for that symbol.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
