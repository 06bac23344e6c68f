//! Reconciliation engine: merges raw holdings with live prices into the
//! current portfolio snapshot.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::{info, warn};
use rust_decimal::Decimal;

use folio_market_data::{lookup_symbol, normalize_symbol, MarketDataProvider};

use crate::errors::Result;
use crate::holdings::{HoldingsExtractor, Portfolio, PricedHolding, RawHolding};
use crate::portfolio::{PortfolioError, PortfolioStoreTrait};

#[async_trait]
pub trait ReconcileServiceTrait: Send + Sync {
    /// Run the extractor over statement bytes, then the full pricing
    /// pipeline, and install the result as the current portfolio.
    async fn upload(&self, statement: &[u8]) -> Result<Arc<Portfolio>>;

    /// Price the given raw holdings and install the result.
    ///
    /// Fails with [`PortfolioError::ExtractionEmpty`] on empty input without
    /// touching the previously installed portfolio.
    async fn reconcile(&self, raw_holdings: Vec<RawHolding>) -> Result<Arc<Portfolio>>;

    /// Re-price the current portfolio's raw holdings.
    ///
    /// Fails with [`PortfolioError::NoPortfolio`] when nothing has been
    /// uploaded yet. Does not re-invoke the extractor.
    async fn refresh(&self) -> Result<Arc<Portfolio>>;
}

pub struct ReconcileService {
    extractor: Arc<dyn HoldingsExtractor>,
    provider: Arc<dyn MarketDataProvider>,
    store: Arc<dyn PortfolioStoreTrait>,
    exchange_suffix: String,
}

impl ReconcileService {
    pub fn new(
        extractor: Arc<dyn HoldingsExtractor>,
        provider: Arc<dyn MarketDataProvider>,
        store: Arc<dyn PortfolioStoreTrait>,
        exchange_suffix: String,
    ) -> Self {
        Self {
            extractor,
            provider,
            store,
            exchange_suffix,
        }
    }

    /// Fetch the latest price for each normalized symbol, once per symbol.
    ///
    /// Lookups run concurrently and a failed lookup only drops that symbol
    /// from the result map; it never fails the run.
    async fn price_symbols(&self, symbols: BTreeSet<String>) -> HashMap<String, Decimal> {
        let fetches = symbols.into_iter().map(|symbol| {
            let lookup = lookup_symbol(&symbol, &self.exchange_suffix);
            let provider = Arc::clone(&self.provider);
            async move {
                let result = provider.get_latest_quote(&lookup).await;
                (symbol, result)
            }
        });

        let mut prices = HashMap::new();
        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(quote) => {
                    prices.insert(symbol, quote.close);
                }
                Err(e) => warn!("Price unavailable for {}: {}", symbol, e),
            }
        }
        prices
    }
}

#[async_trait]
impl ReconcileServiceTrait for ReconcileService {
    async fn upload(&self, statement: &[u8]) -> Result<Arc<Portfolio>> {
        let raw_holdings = self.extractor.extract(statement).await?;
        self.reconcile(raw_holdings).await
    }

    async fn reconcile(&self, raw_holdings: Vec<RawHolding>) -> Result<Arc<Portfolio>> {
        if raw_holdings.is_empty() {
            return Err(PortfolioError::ExtractionEmpty.into());
        }

        let normalized: Vec<(RawHolding, String)> = raw_holdings
            .into_iter()
            .map(|raw| {
                let symbol = normalize_symbol(&raw.ticker_symbol);
                (raw, symbol)
            })
            .collect();

        let unique_symbols: BTreeSet<String> =
            normalized.iter().map(|(_, s)| s.clone()).collect();
        let symbol_count = unique_symbols.len();
        let prices = self.price_symbols(unique_symbols).await;

        let holdings: Vec<PricedHolding> = normalized
            .into_iter()
            .map(|(raw, symbol)| {
                let price = prices.get(&symbol).copied();
                PricedHolding::from_raw(&raw, symbol, price)
            })
            .collect();

        info!(
            "Reconciled {} holdings ({} of {} symbols priced)",
            holdings.len(),
            prices.len(),
            symbol_count
        );

        Ok(self.store.set(Portfolio::new(holdings)))
    }

    async fn refresh(&self) -> Result<Arc<Portfolio>> {
        let current = self.store.get().ok_or(PortfolioError::NoPortfolio)?;
        self.reconcile(current.raw_holdings()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::holdings::CsvStatementExtractor;
    use crate::portfolio::PortfolioStore;
    use folio_market_data::{FixedPriceProvider, MarketDataError, Quote};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts quote lookups per run, to prove symbol dedup.
    struct CountingProvider {
        inner: FixedPriceProvider,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MarketDataProvider for CountingProvider {
        fn id(&self) -> &'static str {
            "COUNTING"
        }

        async fn get_latest_quote(&self, symbol: &str) -> std::result::Result<Quote, MarketDataError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.get_latest_quote(symbol).await
        }
    }

    fn service_with(
        provider: Arc<dyn MarketDataProvider>,
    ) -> (ReconcileService, Arc<PortfolioStore>) {
        let store = Arc::new(PortfolioStore::new());
        let service = ReconcileService::new(
            Arc::new(CsvStatementExtractor::new()),
            provider,
            store.clone(),
            String::new(),
        );
        (service, store)
    }

    fn raw(symbol: &str, quantity: Decimal, avg: Decimal) -> RawHolding {
        RawHolding {
            ticker_symbol: symbol.to_string(),
            stock_name: symbol.to_string(),
            quantity,
            avg_buy_price: avg,
            sector: None,
        }
    }

    #[tokio::test]
    async fn reconcile_prices_and_installs() {
        let provider = Arc::new(FixedPriceProvider::default().with_price("AAPL", dec!(120)));
        let (service, store) = service_with(provider);

        let portfolio = service
            .reconcile(vec![raw("aapl", dec!(10), dec!(100))])
            .await
            .unwrap();

        assert_eq!(portfolio.holdings[0].ticker_symbol, "AAPL");
        assert_eq!(portfolio.holdings[0].current_value, Some(dec!(1200)));
        assert_eq!(store.get().unwrap().total_pnl, dec!(200));
    }

    #[tokio::test]
    async fn one_bad_ticker_does_not_fail_the_run() {
        let provider = Arc::new(FixedPriceProvider::default().with_price("AAPL", dec!(120)));
        let (service, _store) = service_with(provider);

        let portfolio = service
            .reconcile(vec![
                raw("AAPL", dec!(10), dec!(100)),
                raw("BADTICKER", dec!(5), dec!(50)),
            ])
            .await
            .unwrap();

        assert_eq!(portfolio.holdings.len(), 2);
        assert_eq!(portfolio.holdings[1].current_value, None);
        assert_eq!(portfolio.total_investment, dec!(1250));
        assert_eq!(portfolio.total_current_value, dec!(1200));
        assert_eq!(portfolio.total_pnl, dec!(-50));
    }

    #[tokio::test]
    async fn empty_input_fails_and_preserves_previous_portfolio() {
        let provider = Arc::new(FixedPriceProvider::default().with_price("AAPL", dec!(120)));
        let (service, store) = service_with(provider);

        service
            .reconcile(vec![raw("AAPL", dec!(10), dec!(100))])
            .await
            .unwrap();

        let result = service.reconcile(Vec::new()).await;
        assert!(matches!(
            result,
            Err(Error::Portfolio(PortfolioError::ExtractionEmpty))
        ));
        assert_eq!(store.get().unwrap().holdings.len(), 1);
    }

    #[tokio::test]
    async fn duplicate_symbols_are_queried_once() {
        let provider = Arc::new(CountingProvider {
            inner: FixedPriceProvider::default().with_price("AAPL", dec!(120)),
            calls: AtomicUsize::new(0),
        });
        let (service, _store) = service_with(provider.clone());

        service
            .reconcile(vec![
                raw("AAPL", dec!(10), dec!(100)),
                raw("aapl-eq", dec!(2), dec!(90)),
            ])
            .await
            .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_without_portfolio_fails() {
        let provider = Arc::new(FixedPriceProvider::default());
        let (service, _store) = service_with(provider);

        let result = service.refresh().await;
        assert!(matches!(
            result,
            Err(Error::Portfolio(PortfolioError::NoPortfolio))
        ));
    }

    #[tokio::test]
    async fn refresh_reprices_existing_holdings() {
        let (service, store) = service_with(Arc::new(
            FixedPriceProvider::default().with_price("AAPL", dec!(120)),
        ));
        service
            .reconcile(vec![raw("AAPL", dec!(10), dec!(100))])
            .await
            .unwrap();

        // New service over the same store, with a moved price.
        let refreshed_service = ReconcileService::new(
            Arc::new(CsvStatementExtractor::new()),
            Arc::new(FixedPriceProvider::default().with_price("AAPL", dec!(150))),
            store.clone(),
            String::new(),
        );
        let portfolio = refreshed_service.refresh().await.unwrap();

        assert_eq!(portfolio.holdings[0].current_price, Some(dec!(150)));
        assert_eq!(portfolio.total_pnl, dec!(500));
    }

    #[tokio::test]
    async fn upload_runs_extractor_then_pipeline() {
        let provider = Arc::new(FixedPriceProvider::default().with_price("HAL", dec!(4000)));
        let (service, _store) = service_with(provider);

        let statement = b"ticker,name,quantity,avg_price\nHAL,Hindustan Aeronautics,27,3740.59\n";
        let portfolio = service.upload(statement).await.unwrap();

        assert_eq!(portfolio.holdings.len(), 1);
        assert_eq!(portfolio.holdings[0].current_price, Some(dec!(4000)));
    }

    #[tokio::test]
    async fn upload_of_empty_statement_is_rejected() {
        let provider = Arc::new(FixedPriceProvider::default());
        let (service, _store) = service_with(provider);

        let result = service.upload(b"ticker,name,quantity,avg_price\n").await;
        assert!(matches!(
            result,
            Err(Error::Portfolio(PortfolioError::ExtractionEmpty))
        ));
    }
}
