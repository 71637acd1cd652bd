use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::auth::errors::AuthError;
use service::orders::{OrderError, OutcomeStatus};
use thiserror::Error;
use tracing::error;

/// JSON error body `{ "error": <title>, "message": <detail> }`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.title,
            "message": self.detail.unwrap_or_default(),
        });
        (self.status, Json(body)).into_response()
    }
}

/// HTTP status for a lifecycle outcome tag.
pub fn status_code(outcome: OutcomeStatus) -> StatusCode {
    match outcome {
        OutcomeStatus::Ok => StatusCode::OK,
        OutcomeStatus::Created => StatusCode::CREATED,
        OutcomeStatus::NoContent => StatusCode::NO_CONTENT,
        OutcomeStatus::BadRequest => StatusCode::BAD_REQUEST,
        OutcomeStatus::NotFound => StatusCode::NOT_FOUND,
        OutcomeStatus::Conflict => StatusCode::CONFLICT,
        OutcomeStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<OrderError> for JsonApiError {
    fn from(e: OrderError) -> Self {
        let status = status_code(e.status());
        JsonApiError::new(status, e.status().as_str(), Some(e.message()))
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            AuthError::Unauthorized => JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("Invalid credentials.".into())),
            AuthError::Forbidden => JsonApiError::new(StatusCode::FORBIDDEN, "Forbidden", Some("Admin role required.".into())),
            AuthError::Conflict => JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some("User already exists.".into())),
            other => {
                error!(code = other.code(), error = %other, "auth failure");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some("Internal server error.".into()))
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
