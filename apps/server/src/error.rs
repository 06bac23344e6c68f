//! API error type and HTTP status mapping.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use folio_ai::AiError;
use folio_core::errors::Error as CoreError;
use folio_core::portfolio::PortfolioError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error surfaced to HTTP clients as a JSON body with a stable code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}: {}", self.code, self.message);
        }
        let body = Json(json!({
            "error": { "code": self.code, "message": self.message }
        }));
        (self.status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::Portfolio(PortfolioError::ExtractionEmpty) => {
                Self::bad_request("EXTRACTION_EMPTY", err.to_string())
            }
            CoreError::Portfolio(PortfolioError::NoPortfolio) => {
                Self::not_found("NO_PORTFOLIO", err.to_string())
            }
            CoreError::Portfolio(PortfolioError::Extraction(_)) => {
                Self::bad_request("EXTRACTION_FAILED", err.to_string())
            }
            CoreError::Validation(_) => Self::bad_request("INVALID_INPUT", err.to_string()),
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        let status = match &err {
            AiError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.code(), err.to_string())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::bad_request("INVALID_UPLOAD", err.to_string())
    }
}
