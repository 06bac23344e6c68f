use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scale used for all displayed monetary values and percentages.
pub const DISPLAY_SCALE: u32 = 2;

/// Sector label used when the statement carries no sector information.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// One line item of a broker statement, as produced by an extractor.
///
/// Immutable after extraction; reconciliation never rewrites these fields,
/// it derives a fresh [`PricedHolding`] from them on every run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawHolding {
    pub ticker_symbol: String,
    pub stock_name: String,
    pub quantity: Decimal,
    pub avg_buy_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
}

/// A holding enriched with the latest price and derived P&L metrics.
///
/// Price-dependent fields are `None` when the price lookup failed for this
/// symbol; absent prices propagate to the portfolio aggregates as exclusion,
/// never as zero.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PricedHolding {
    pub ticker_symbol: String,
    pub stock_name: String,
    pub sector: String,
    pub quantity: Decimal,
    pub avg_buy_price: Decimal,
    pub invested_value: Decimal,
    pub current_price: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub pnl_absolute: Option<Decimal>,
    pub pnl_percentage: Option<Decimal>,
}

impl PricedHolding {
    /// Derive metrics for one holding from its raw row and an optional price.
    ///
    /// `pnl_percentage` is defined as `pnl_absolute / invested_value * 100`
    /// and is exactly zero when `invested_value` is zero. That zero-guard is
    /// a documented policy choice, not broker behavior.
    pub fn from_raw(raw: &RawHolding, normalized_symbol: String, price: Option<Decimal>) -> Self {
        let invested_value = (raw.quantity * raw.avg_buy_price).round_dp(DISPLAY_SCALE);

        let current_price = price.map(|p| p.round_dp(DISPLAY_SCALE));
        let current_value = price.map(|p| (raw.quantity * p).round_dp(DISPLAY_SCALE));
        let pnl_absolute = current_value.map(|cv| cv - invested_value);
        let pnl_percentage = pnl_absolute.map(|pnl| {
            if invested_value.is_zero() {
                Decimal::ZERO
            } else {
                (pnl / invested_value * Decimal::ONE_HUNDRED).round_dp(DISPLAY_SCALE)
            }
        });

        PricedHolding {
            ticker_symbol: normalized_symbol,
            stock_name: raw.stock_name.clone(),
            sector: raw
                .sector
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_SECTOR.to_string()),
            quantity: raw.quantity,
            avg_buy_price: raw.avg_buy_price,
            invested_value,
            current_price,
            current_value,
            pnl_absolute,
            pnl_percentage,
        }
    }

    /// Rebuild the raw statement row this holding was derived from.
    pub fn to_raw(&self) -> RawHolding {
        RawHolding {
            ticker_symbol: self.ticker_symbol.clone(),
            stock_name: self.stock_name.clone(),
            quantity: self.quantity,
            avg_buy_price: self.avg_buy_price,
            sector: if self.sector == UNKNOWN_SECTOR {
                None
            } else {
                Some(self.sector.clone())
            },
        }
    }
}

/// The single current portfolio snapshot: priced holdings plus aggregates.
///
/// Replaced wholesale on every upload or refresh, never merged with the
/// previous snapshot.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub holdings: Vec<PricedHolding>,
    pub total_investment: Decimal,
    pub total_current_value: Decimal,
    pub total_pnl: Decimal,
    pub total_pnl_percentage: Decimal,
    pub as_of: DateTime<Utc>,
}

impl Portfolio {
    /// Build a portfolio from priced holdings, computing the aggregates.
    ///
    /// `total_investment` sums every holding; `total_current_value` sums only
    /// holdings with a resolved price, so unpriced rows contribute to the
    /// invested side of `total_pnl` but not the current side.
    pub fn new(holdings: Vec<PricedHolding>) -> Self {
        let total_investment: Decimal = holdings.iter().map(|h| h.invested_value).sum();
        let total_current_value: Decimal =
            holdings.iter().filter_map(|h| h.current_value).sum();
        let total_pnl = total_current_value - total_investment;
        let total_pnl_percentage = if total_investment.is_zero() {
            Decimal::ZERO
        } else {
            (total_pnl / total_investment * Decimal::ONE_HUNDRED).round_dp(DISPLAY_SCALE)
        };

        Portfolio {
            holdings,
            total_investment,
            total_current_value,
            total_pnl,
            total_pnl_percentage,
            as_of: Utc::now(),
        }
    }

    /// The raw statement rows backing this snapshot, for re-pricing.
    pub fn raw_holdings(&self) -> Vec<RawHolding> {
        self.holdings.iter().map(PricedHolding::to_raw).collect()
    }

    /// Aggregates-only projection for the dashboard header and chat grounding.
    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary {
            total_holdings: self.holdings.len(),
            total_investment: self.total_investment,
            total_current_value: self.total_current_value,
            total_pnl: self.total_pnl,
            total_pnl_percentage: self.total_pnl_percentage,
            as_of: self.as_of,
        }
    }
}

/// Aggregates-only view of the current portfolio.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_holdings: usize,
    pub total_investment: Decimal,
    pub total_current_value: Decimal,
    pub total_pnl: Decimal,
    pub total_pnl_percentage: Decimal,
    pub as_of: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(symbol: &str, quantity: Decimal, avg: Decimal) -> RawHolding {
        RawHolding {
            ticker_symbol: symbol.to_string(),
            stock_name: format!("{} Ltd", symbol),
            quantity,
            avg_buy_price: avg,
            sector: None,
        }
    }

    #[test]
    fn priced_holding_metrics() {
        let h = PricedHolding::from_raw(
            &raw("AAPL", dec!(10), dec!(100)),
            "AAPL".to_string(),
            Some(dec!(120)),
        );
        assert_eq!(h.invested_value, dec!(1000));
        assert_eq!(h.current_value, Some(dec!(1200)));
        assert_eq!(h.pnl_absolute, Some(dec!(200)));
        assert_eq!(h.pnl_percentage, Some(dec!(20)));
    }

    #[test]
    fn missing_price_leaves_metrics_absent() {
        let h = PricedHolding::from_raw(
            &raw("BADTICKER", dec!(5), dec!(50)),
            "BADTICKER".to_string(),
            None,
        );
        assert_eq!(h.invested_value, dec!(250));
        assert_eq!(h.current_price, None);
        assert_eq!(h.current_value, None);
        assert_eq!(h.pnl_absolute, None);
        assert_eq!(h.pnl_percentage, None);
    }

    #[test]
    fn zero_invested_value_has_zero_pnl_percentage() {
        let h = PricedHolding::from_raw(
            &raw("FREEBIE", dec!(3), dec!(0)),
            "FREEBIE".to_string(),
            Some(dec!(10)),
        );
        assert_eq!(h.invested_value, dec!(0));
        assert_eq!(h.pnl_absolute, Some(dec!(30)));
        assert_eq!(h.pnl_percentage, Some(dec!(0)));
    }

    #[test]
    fn sector_defaults_to_unknown() {
        let h = PricedHolding::from_raw(
            &raw("TCS", dec!(1), dec!(100)),
            "TCS".to_string(),
            None,
        );
        assert_eq!(h.sector, UNKNOWN_SECTOR);
    }

    #[test]
    fn aggregates_exclude_unpriced_current_value() {
        let priced = PricedHolding::from_raw(
            &raw("AAPL", dec!(10), dec!(100)),
            "AAPL".to_string(),
            Some(dec!(120)),
        );
        let unpriced = PricedHolding::from_raw(
            &raw("BADTICKER", dec!(5), dec!(50)),
            "BADTICKER".to_string(),
            None,
        );
        let portfolio = Portfolio::new(vec![priced, unpriced]);

        assert_eq!(portfolio.total_investment, dec!(1250));
        assert_eq!(portfolio.total_current_value, dec!(1200));
        assert_eq!(portfolio.total_pnl, dec!(-50));
        assert_eq!(portfolio.total_pnl_percentage, dec!(-4));
    }

    #[test]
    fn empty_portfolio_aggregates_are_zero() {
        let portfolio = Portfolio::new(Vec::new());
        assert_eq!(portfolio.total_investment, dec!(0));
        assert_eq!(portfolio.total_pnl_percentage, dec!(0));
    }

    #[test]
    fn raw_holdings_round_trip() {
        let original = raw("INFY", dec!(7), dec!(1500));
        let priced =
            PricedHolding::from_raw(&original, "INFY".to_string(), Some(dec!(1600)));
        let portfolio = Portfolio::new(vec![priced]);
        assert_eq!(portfolio.raw_holdings(), vec![original]);
    }
}
