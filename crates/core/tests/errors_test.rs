use std::error::Error;
use mailing_core::errors::{MailingError, MailingResult};

#[test]
fn test_mailing_error_display() {
    let not_found = MailingError::NotFound("Client with ID 7 not found".to_string());
    let validation = MailingError::Validation("Invalid input".to_string());
    let database = MailingError::Database(eyre::eyre!("Database connection failed"));
    let internal = MailingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Client with ID 7 not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_constructor_helpers() {
    assert!(matches!(
        MailingError::validation("bad"),
        MailingError::Validation(message) if message == "bad"
    ));
    assert!(matches!(
        MailingError::not_found(String::from("gone")),
        MailingError::NotFound(message) if message == "gone"
    ));
}

#[test]
fn test_internal_error_keeps_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let error = MailingError::Internal(Box::new(io_error));

    assert!(error.source().is_some());
    assert!(error.to_string().contains("IO error"));
}

#[test]
fn test_eyre_conversion() {
    fn fails() -> MailingResult<()> {
        let result: eyre::Result<()> = Err(eyre::eyre!("connection reset"));
        result?;
        Ok(())
    }

    let error = fails().unwrap_err();
    assert!(matches!(error, MailingError::Database(_)));
    assert!(error.to_string().contains("connection reset"));
}
