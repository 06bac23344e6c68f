use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    routing::{get, post},
    Json, Router,
};

use folio_core::holdings::{Portfolio, PortfolioSummary};

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn upload_statement(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<Portfolio>> {
    let mut statement: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            statement = Some(field.bytes().await?.to_vec());
            break;
        }
    }
    let statement = statement
        .ok_or_else(|| ApiError::bad_request("INVALID_UPLOAD", "Missing \"file\" field"))?;

    let portfolio = state.reconcile_service.upload(&statement).await?;
    Ok(Json(portfolio.as_ref().clone()))
}

async fn get_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Json<Portfolio>> {
    let portfolio = state.portfolio_store.get().ok_or_else(|| {
        ApiError::not_found("NO_PORTFOLIO", "No portfolio data found. Please upload a statement first.")
    })?;
    Ok(Json(portfolio.as_ref().clone()))
}

async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    let summary = state.portfolio_store.summary().ok_or_else(|| {
        ApiError::not_found("NO_PORTFOLIO", "No portfolio data found. Please upload a statement first.")
    })?;
    Ok(Json(summary))
}

async fn refresh_portfolio(State(state): State<Arc<AppState>>) -> ApiResult<Json<Portfolio>> {
    let portfolio = state.reconcile_service.refresh().await?;
    Ok(Json(portfolio.as_ref().clone()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload_statement))
        .route("/", get(get_portfolio))
        .route("/summary", get(get_summary))
        .route("/refresh", post(refresh_portfolio))
}
