//! HTTP backend for the folio dashboard: statement upload, priced portfolio
//! views, and portfolio-grounded chat.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};
