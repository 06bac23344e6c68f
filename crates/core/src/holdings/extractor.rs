//! Holdings extraction from uploaded statement bytes.
//!
//! Extraction quality is an external concern: anything that can turn a
//! statement into [`RawHolding`] rows can sit behind [`HoldingsExtractor`].
//! The bundled implementation reads the delimited export format most brokers
//! offer alongside PDF statements.

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::errors::{Result, ValidationError};
use crate::holdings::RawHolding;

/// Turns statement bytes into raw holding rows.
#[async_trait]
pub trait HoldingsExtractor: Send + Sync {
    /// Extract all holdings from a statement.
    ///
    /// Returning an empty vector is valid here; rejecting empty statements is
    /// the reconciliation engine's job so a failed extraction can never
    /// replace an installed portfolio.
    async fn extract(&self, statement: &[u8]) -> Result<Vec<RawHolding>>;
}

#[derive(Debug, Deserialize)]
struct StatementRow {
    #[serde(alias = "ticker", alias = "symbol")]
    ticker_symbol: String,
    #[serde(alias = "name", alias = "stock")]
    stock_name: String,
    quantity: Decimal,
    #[serde(alias = "avg_price", alias = "buy_price", alias = "avg_unit_cost")]
    avg_buy_price: Decimal,
    #[serde(default)]
    sector: Option<String>,
}

/// Extractor for CSV holdings exports.
///
/// Expects a header row; column names are matched case-sensitively with the
/// common broker aliases (`ticker`, `symbol`, `avg_price`, ...). Rows with an
/// empty ticker (footers, totals) are skipped.
#[derive(Default)]
pub struct CsvStatementExtractor;

impl CsvStatementExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HoldingsExtractor for CsvStatementExtractor {
    async fn extract(&self, statement: &[u8]) -> Result<Vec<RawHolding>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(statement);

        let mut holdings = Vec::new();
        for record in reader.deserialize::<StatementRow>() {
            let row = record?;
            if row.ticker_symbol.is_empty() {
                continue;
            }
            if row.quantity.is_sign_negative() || row.avg_buy_price.is_sign_negative() {
                return Err(ValidationError::InvalidInput(format!(
                    "Negative quantity or price for {}",
                    row.ticker_symbol
                ))
                .into());
            }
            holdings.push(RawHolding {
                ticker_symbol: row.ticker_symbol,
                stock_name: row.stock_name,
                quantity: row.quantity,
                avg_buy_price: row.avg_buy_price,
                sector: row.sector.filter(|s| !s.is_empty()),
            });
        }

        debug!("Extracted {} holdings from statement", holdings.len());
        Ok(holdings)
    }
}
