//! Application state wiring and tracing setup.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use folio_ai::{
    ChatService, ChatServiceTrait, InMemorySessionRepository, LlmConfig, RigLlmClient,
};
use folio_core::holdings::CsvStatementExtractor;
use folio_core::portfolio::{
    PortfolioStore, PortfolioStoreTrait, ReconcileService, ReconcileServiceTrait,
};
use folio_market_data::YahooProvider;

use crate::config::Config;

pub struct AppState {
    pub reconcile_service: Arc<dyn ReconcileServiceTrait>,
    pub portfolio_store: Arc<dyn PortfolioStoreTrait>,
    pub chat_service: Arc<dyn ChatServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let portfolio_store = Arc::new(PortfolioStore::new());
    let provider = Arc::new(YahooProvider::new(&config.quote_currency)?);
    let extractor = Arc::new(CsvStatementExtractor::new());

    let reconcile_service = Arc::new(ReconcileService::new(
        extractor,
        provider,
        portfolio_store.clone(),
        config.exchange_suffix.clone(),
    ));

    let llm = Arc::new(RigLlmClient::new(LlmConfig {
        provider_id: config.ai_provider.clone(),
        model: config.ai_model.clone(),
        api_key: config.ai_api_key.clone(),
        base_url: config.ai_base_url.clone(),
    }));
    let chat_service = Arc::new(ChatService::new(
        Arc::new(InMemorySessionRepository::new()),
        llm,
        portfolio_store.clone(),
    ));

    Ok(Arc::new(AppState {
        reconcile_service,
        portfolio_store,
        chat_service,
    }))
}
