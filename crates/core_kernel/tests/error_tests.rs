//! Tests for core and port error types

use core_kernel::{CoreError, PortError};

#[test]
fn test_core_error_constructors() {
    let error = CoreError::validation("missing field");
    assert!(matches!(error, CoreError::Validation(_)));
    assert!(error.to_string().contains("missing field"));

    let error = CoreError::invalid_state("pending -> pending");
    assert!(matches!(error, CoreError::InvalidStateTransition(_)));

    let error = CoreError::not_found("post");
    assert!(matches!(error, CoreError::NotFound(_)));
}

#[test]
fn test_port_error_not_found_message() {
    let error = PortError::not_found("Claim", "CLM-42");
    assert!(error.is_not_found());
    assert!(error.to_string().contains("Claim"));
    assert!(error.to_string().contains("CLM-42"));
}

#[test]
fn test_port_error_validation_with_field() {
    let error = PortError::validation_field("must not be empty", "message");
    match error {
        PortError::Validation { message, field } => {
            assert_eq!(message, "must not be empty");
            assert_eq!(field.as_deref(), Some("message"));
        }
        other => panic!("unexpected variant: {other:?}"),
    }
}

#[test]
fn test_port_error_conflict_is_not_transient() {
    let error = PortError::conflict("duplicate claim");
    assert!(error.is_conflict());
    assert!(!error.is_transient());
    assert!(!error.is_not_found());
}

#[test]
fn test_port_error_connection_is_transient() {
    let error = PortError::connection("pool exhausted");
    assert!(error.is_transient());
}
