//! Portfolio module - reconciliation and the current-snapshot store.

mod portfolio_errors;
mod portfolio_store;
mod reconcile_service;

pub use portfolio_errors::PortfolioError;
pub use portfolio_store::{PortfolioStore, PortfolioStoreTrait};
pub use reconcile_service::{ReconcileService, ReconcileServiceTrait};
