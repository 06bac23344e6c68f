//! Core domain for the folio backend: holdings, reconciliation, and the
//! current-portfolio store.
//!
//! The pipeline is: a [`holdings::HoldingsExtractor`] turns statement bytes
//! into [`holdings::RawHolding`] rows, the
//! [`portfolio::ReconcileService`] prices them against a market data
//! provider and computes P&L metrics, and the result is installed atomically
//! into the [`portfolio::PortfolioStore`] as the single current snapshot.

pub mod errors;
pub mod holdings;
pub mod portfolio;

pub use errors::{Error, Result};
