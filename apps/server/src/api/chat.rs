use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use folio_ai::{ChatResponse, ChatSession, SendMessageRequest, SessionSummary};

use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Json<ChatResponse>> {
    let response = state.chat_service.send_message(request).await?;
    Ok(Json(response))
}

async fn list_sessions(State(state): State<Arc<AppState>>) -> Json<Vec<SessionSummary>> {
    Json(state.chat_service.list_sessions())
}

async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionSummary> {
    Json(state.chat_service.create_session().summary())
}

async fn get_session(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ChatSession>> {
    let session = state.chat_service.get_session(&id)?;
    Ok(Json(session))
}

async fn delete_session(
    Path(id): Path<Uuid>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.chat_service.delete_session(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetRequest {
    session_id: Uuid,
}

async fn reset_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResetRequest>,
) -> ApiResult<Json<ChatSession>> {
    let session = state.chat_service.reset_session(&request.session_id)?;
    Ok(Json(session))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(send_message))
        .route("/sessions", get(list_sessions).post(create_session))
        .route("/sessions/{id}", get(get_session).delete(delete_session))
        .route("/reset", post(reset_session))
}
