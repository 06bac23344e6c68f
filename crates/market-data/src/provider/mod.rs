//! Market data providers.

mod fixed;
mod traits;
mod yahoo;

pub use fixed::FixedPriceProvider;
pub use traits::MarketDataProvider;
pub use yahoo::YahooProvider;
