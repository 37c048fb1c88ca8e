use poem::error::ResponseError;
use poem::http::StatusCode;
use poem::{Body, Response};
use thiserror::Error;
use tracing::error;

/// Top-level application error used across handlers.
///
/// Every variant renders as `{"error": "<message>"}` with its mapped status;
/// internal detail is logged at the point of failure, never sent to clients.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("internal server error")]
    Store,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Log a store-layer failure with context and collapse it to a 500.
    pub fn store<E: std::fmt::Display>(context: &'static str, err: E) -> Self {
        error!("{context}: {err}");
        Self::Store
    }
}

impl ResponseError for AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_response(&self) -> Response {
        error_body(self.status(), &self.to_string())
    }
}

pub fn error_body(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message });
    Response::builder()
        .status(status)
        .content_type("application/json")
        .body(Body::from_json(&body).unwrap_or_else(|_| Body::from_string(message.to_string())))
}
