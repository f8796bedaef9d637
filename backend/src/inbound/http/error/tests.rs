//! Tests for HTTP error mapping.

use super::*;
use crate::domain::DomainError;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use serde_json::json;

#[fixture]
fn unknown_error_case() -> DomainError {
    DomainError::unknown("connection reset by peer").with_details(json!({"table": "users"}))
}

#[fixture]
fn duplicate_tag_case() -> DomainError {
    DomainError::already_existing("profile alice already exists")
        .with_details(json!({"constraint": "profiles_tag_name_key"}))
}

#[rstest]
#[case(ErrorCode::IncorrectParameters, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::AlreadyExisting, StatusCode::CONFLICT)]
#[case(ErrorCode::DependencyNotSatisfied, StatusCode::NOT_FOUND)]
#[case(ErrorCode::NotExistingEntity, StatusCode::NOT_FOUND)]
#[case(ErrorCode::NotValidCredentials, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::PasswordUnableToHash, StatusCode::INTERNAL_SERVER_ERROR)]
#[case(ErrorCode::Unknown, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    let err = DomainError::new(code, "failure");
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
fn every_code_has_a_client_or_server_error_status() {
    for code in ErrorCode::ALL {
        let status = status_for(code);
        assert!(status.is_client_error() || status.is_server_error(), "{code:?}");
    }
}

async fn assert_error_response(error: DomainError, expected_status: StatusCode) -> DomainError {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn error_responses_redact_unknown_failures(
    #[from(unknown_error_case)] unknown: DomainError,
    #[from(duplicate_tag_case)] duplicate: DomainError,
) {
    let redacted = assert_error_response(unknown, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(redacted.code(), ErrorCode::Unknown);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());

    let payload = assert_error_response(duplicate, StatusCode::CONFLICT).await;
    assert_eq!(payload.code(), ErrorCode::AlreadyExisting);
    assert_eq!(payload.message(), "profile alice already exists");
    assert_eq!(
        payload.details(),
        Some(&json!({"constraint": "profiles_tag_name_key"}))
    );
}

#[rstest]
#[actix_web::test]
async fn hashing_failures_keep_their_code() {
    let error = DomainError::password_unable_to_hash("password could not be hashed");

    let payload = assert_error_response(error, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(payload.code(), ErrorCode::PasswordUnableToHash);
    assert_eq!(payload.message(), "password could not be hashed");
}

#[given("a missing dependency error code")]
fn a_missing_dependency_error_code() -> ErrorCode {
    ErrorCode::DependencyNotSatisfied
}

#[when("the adapter maps the code to an HTTP status")]
fn the_adapter_maps_the_code_to_http_status(code: ErrorCode) -> StatusCode {
    super::status_for(code)
}

#[then("the status is 404 Not Found")]
fn the_status_is_404_not_found(status: StatusCode) {
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[given("an unknown storage failure")]
fn an_unknown_storage_failure() -> DomainError {
    DomainError::unknown("relation \"posts\" does not exist")
}

#[when("the adapter redacts the client payload")]
fn the_adapter_redacts_the_client_payload(error: DomainError) -> String {
    super::redact_if_unknown(&error).message().to_owned()
}

#[then("clients see the generic internal error message")]
fn clients_see_the_generic_internal_error_message(message: String) {
    assert_eq!(message, "Internal server error");
}

#[rstest]
fn missing_dependencies_map_to_not_found() {
    let code = a_missing_dependency_error_code();
    let status = the_adapter_maps_the_code_to_http_status(code);
    the_status_is_404_not_found(status);
}

#[rstest]
fn unknown_failures_are_redacted() {
    let error = an_unknown_storage_failure();
    let message = the_adapter_redacts_the_client_payload(error);
    clients_see_the_generic_internal_error_message(message);
}
