//! Tests for domain error construction and trace capture.

use super::*;
use crate::middleware::trace::{RequestContext, TraceId};
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(ErrorCode::NotFound, "not_found")]
#[case(ErrorCode::InvalidSortField, "invalid_sort_field")]
#[case(ErrorCode::InvalidSortDirection, "invalid_sort_direction")]
#[case(ErrorCode::InvalidPageNumber, "invalid_page_number")]
#[case(ErrorCode::InvalidPageSize, "invalid_page_size")]
#[case(ErrorCode::ValidationFailed, "validation_failed")]
#[case(ErrorCode::Unauthorized, "unauthorized")]
#[case(ErrorCode::InternalError, "internal_error")]
fn codes_serialise_as_snake_case(#[case] code: ErrorCode, #[case] token: &str) {
    assert_eq!(code.as_str(), token);
    assert_eq!(
        serde_json::to_value(code).expect("serialise code"),
        json!(token)
    );
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id
        .parse()
        .expect("fixtures provide a valid UUID");
    let error = RequestContext::new(trace_id, "/api/v1/vehicles")
        .scope(async { Error::not_found("missing") })
        .await;

    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn validation_failed_keeps_every_field() {
    let errors = BTreeMap::from([
        ("email".to_owned(), "Email is required".to_owned()),
        ("password".to_owned(), "Password is required".to_owned()),
    ]);
    let error = Error::validation_failed(errors.clone());

    assert_eq!(error.code(), ErrorCode::ValidationFailed);
    assert_eq!(error.message(), "Validation error");
    assert_eq!(error.field_errors(), Some(&errors));
}

#[rstest]
fn empty_field_error_maps_are_dropped() {
    let error = Error::validation_failed(BTreeMap::new());
    assert!(error.field_errors().is_none());
}

#[rstest]
fn builders_attach_details_and_trace_id(expected_trace_id: String) {
    let error = Error::new(ErrorCode::InvalidSortField, "bad")
        .with_details(json!({"value": "colour"}))
        .with_trace_id(expected_trace_id.clone());

    assert_eq!(error.details(), Some(&json!({"value": "colour"})));
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
    assert_eq!(error.to_string(), "bad");
}
