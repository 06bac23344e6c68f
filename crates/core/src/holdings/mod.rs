//! Holdings module - raw statement rows, priced holdings, and extraction.

mod extractor;
mod holdings_model;

pub use extractor::{CsvStatementExtractor, HoldingsExtractor};
pub use holdings_model::{Portfolio, PortfolioSummary, PricedHolding, RawHolding, UNKNOWN_SECTOR};
