use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use mailing_api::middleware::error_handling::AppError;
use mailing_core::errors::MailingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{json, Value};

#[rstest]
#[case(MailingError::NotFound("Client with ID 1 not found".to_string()), StatusCode::NOT_FOUND)]
#[case(MailingError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(MailingError::Database(eyre::eyre!("Database error")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    MailingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "Internal error"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status(#[case] error: MailingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_shape() {
    let response = AppError(MailingError::validation("Unknown tags: gold")).into_response();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body, json!({ "error": "Validation error: Unknown tags: gold" }));
}

#[test]
fn test_eyre_report_is_database_error() {
    let error = AppError::from(eyre::eyre!("pool timed out"));

    assert!(matches!(error.0, MailingError::Database(_)));
    assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
