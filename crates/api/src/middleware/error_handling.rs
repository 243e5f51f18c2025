//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies of the
//! form `{"error": "<message>"}`. Extractor rejections (malformed JSON,
//! non-numeric ids) are reported the same way as validation errors.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mailing_core::errors::MailingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `MailingError` and implements `IntoResponse`, so
/// handlers can return `Result<_, AppError>` and use `?` on service calls.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use mailing_api::middleware::error_handling::AppError;
/// use mailing_core::errors::MailingError;
///
/// async fn handler(id: i32) -> Result<Json<i32>, AppError> {
///     if id < 0 {
///         return Err(AppError(MailingError::NotFound(format!("Client with ID {id} not found"))));
///     }
///     Ok(Json(id))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub MailingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            MailingError::NotFound(_) => StatusCode::NOT_FOUND,
            MailingError::Validation(_) => StatusCode::BAD_REQUEST,
            MailingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MailingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Converts application errors to HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

impl From<MailingError> for AppError {
    fn from(err: MailingError) -> Self {
        AppError(err)
    }
}

/// Unhandled `eyre` reports are treated as storage failures.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(MailingError::Database(err))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(MailingError::Validation(rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(MailingError::Validation(rejection.body_text()))
    }
}
