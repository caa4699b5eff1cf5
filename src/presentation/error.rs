// HTTP error mapping
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::domain::query::SelectionError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A selector value that could not be parsed
    #[error(transparent)]
    Selection(#[from] SelectionError),

    /// The response body could not be produced
    #[error("failed to encode response")]
    Encoding(StatusCode),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Selection(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Encoding(status) => (*status, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = json!({
            "error": self.to_string(),
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
