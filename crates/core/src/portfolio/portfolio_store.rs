//! Process-wide store for the single current portfolio snapshot.

use std::sync::{Arc, RwLock};

use crate::holdings::{Portfolio, PortfolioSummary};

/// Store holding at most one current [`Portfolio`].
///
/// `set` must be atomic with respect to `get` and `summary`: a reader never
/// observes holdings from one snapshot paired with aggregates from another.
pub trait PortfolioStoreTrait: Send + Sync {
    /// The current snapshot, if one has been installed.
    fn get(&self) -> Option<Arc<Portfolio>>;

    /// Atomically replace the current snapshot.
    fn set(&self, portfolio: Portfolio) -> Arc<Portfolio>;

    /// Aggregates-only projection of the current snapshot.
    fn summary(&self) -> Option<PortfolioSummary>;
}

/// In-memory portfolio store.
///
/// The snapshot is shared as an `Arc`, so `set` is a pointer swap under a
/// short write lock and readers keep whatever snapshot they cloned even while
/// a replacement is being installed. No history is retained.
#[derive(Default)]
pub struct PortfolioStore {
    current: RwLock<Option<Arc<Portfolio>>>,
}

impl PortfolioStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PortfolioStoreTrait for PortfolioStore {
    fn get(&self) -> Option<Arc<Portfolio>> {
        self.current.read().unwrap().clone()
    }

    fn set(&self, portfolio: Portfolio) -> Arc<Portfolio> {
        let snapshot = Arc::new(portfolio);
        *self.current.write().unwrap() = Some(snapshot.clone());
        snapshot
    }

    fn summary(&self) -> Option<PortfolioSummary> {
        self.get().map(|p| p.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holdings::{PricedHolding, RawHolding};
    use rust_decimal_macros::dec;

    fn sample_portfolio() -> Portfolio {
        let raw = RawHolding {
            ticker_symbol: "TCS".to_string(),
            stock_name: "Tata Consultancy".to_string(),
            quantity: dec!(5),
            avg_buy_price: dec!(3200),
            sector: None,
        };
        Portfolio::new(vec![PricedHolding::from_raw(
            &raw,
            "TCS".to_string(),
            Some(dec!(3500)),
        )])
    }

    #[test]
    fn starts_empty() {
        let store = PortfolioStore::new();
        assert!(store.get().is_none());
        assert!(store.summary().is_none());
    }

    #[test]
    fn set_replaces_wholesale() {
        let store = PortfolioStore::new();
        store.set(sample_portfolio());
        let first = store.get().unwrap();

        store.set(Portfolio::new(Vec::new()));
        let second = store.get().unwrap();

        // The first snapshot is untouched by the replacement.
        assert_eq!(first.holdings.len(), 1);
        assert!(second.holdings.is_empty());
    }

    #[test]
    fn summary_matches_snapshot() {
        let store = PortfolioStore::new();
        store.set(sample_portfolio());
        let summary = store.summary().unwrap();
        assert_eq!(summary.total_holdings, 1);
        assert_eq!(summary.total_investment, dec!(16000));
        assert_eq!(summary.total_current_value, dec!(17500));
    }
}
