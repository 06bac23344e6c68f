//! Price source abstraction for the folio backend.
//!
//! The reconciliation engine only ever needs the latest quote for a broker
//! ticker. This crate provides:
//! - [`MarketDataProvider`] - the trait a price source implements
//! - [`YahooProvider`] - the production provider built on the Yahoo Finance API
//! - [`normalize_symbol`] / [`lookup_symbol`] - broker-symbol cleanup so that
//!   extractor output becomes provider-ready

pub mod errors;
pub mod models;
pub mod provider;
pub mod symbol;

pub use errors::MarketDataError;
pub use models::Quote;
pub use provider::{FixedPriceProvider, MarketDataProvider, YahooProvider};
pub use symbol::{lookup_symbol, normalize_symbol};
