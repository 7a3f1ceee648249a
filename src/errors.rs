use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden")]
    Forbidden,
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    ValidationError(String),
    #[error("Too many requests")]
    RateLimited,
    /// Store or upload failure whose message is shown to the caller as is.
    #[error("{0}")]
    Store(String),
    #[error("Internal server error")]
    InternalError(String),
}

/// Failures reported by a [`PostStore`](crate::store::PostStore) or
/// [`UserDirectory`](crate::store::UserDirectory).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("Duplicate entry: {0}")]
    Duplicate(String),
    #[error("Not found")]
    NotFound,
    #[error("{0}")]
    Backend(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(_) => ApiError::UserAlreadyExists,
            StoreError::NotFound => ApiError::NotFound,
            other => ApiError::Store(other.to_string()),
        }
    }
}

/// Malformed JSON bodies keep the `{"message"}` shape instead of axum's
/// plain-text rejection.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationError(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::UserAlreadyExists => StatusCode::CONFLICT,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Store(_) | ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every error renders as `{"message": ...}`. Internal errors are logged and
/// replaced by a generic message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::InternalError(msg) => error!("Internal error: {}", msg),
            ApiError::Store(msg) => error!("Store failure: {}", msg),
            _ => {}
        }

        (
            status,
            Json(serde_json::json!({
              "message": self.to_string()
            })),
        )
            .into_response()
    }
}
