//! Tests for domain error construction and trace propagation.

use super::*;
use rstest::rstest;
use uuid::Uuid;

#[rstest]
#[case(Error::invalid_input("x"), ErrorCode::InvalidInput)]
#[case(Error::invalid_format("x"), ErrorCode::InvalidFormat)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::storage_unavailable("x"), ErrorCode::StorageUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidInput, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[tokio::test]
async fn new_captures_scoped_trace_id() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { Error::conflict("dup") }).await;
    assert_eq!(error.trace_id(), Some(Uuid::nil().to_string().as_str()));
}

#[rstest]
fn code_labels_are_snake_case() {
    assert_eq!(ErrorCode::StorageUnavailable.to_string(), "storage_unavailable");
    let json = serde_json::to_string(&ErrorCode::InvalidFormat).expect("serialise code");
    assert_eq!(json, "\"invalid_format\"");
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::conflict("Email already exists").to_string(), "Email already exists");
}
