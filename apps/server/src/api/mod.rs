use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub mod chat;
pub mod health;
pub mod portfolio;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .nest("/portfolio", portfolio::router())
        .nest("/chat", chat::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
