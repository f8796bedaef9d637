//! Tests for domain error construction and serialisation.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(DomainError::incorrect_parameters("bad"), ErrorCode::IncorrectParameters)]
#[case(DomainError::already_existing("taken"), ErrorCode::AlreadyExisting)]
#[case(DomainError::dependency_not_satisfied("missing owner"), ErrorCode::DependencyNotSatisfied)]
#[case(DomainError::not_existing_entity("missing"), ErrorCode::NotExistingEntity)]
#[case(DomainError::not_valid_credentials("nope"), ErrorCode::NotValidCredentials)]
#[case(DomainError::password_unable_to_hash("hasher failed"), ErrorCode::PasswordUnableToHash)]
#[case(DomainError::unknown("boom"), ErrorCode::Unknown)]
fn constructors_set_code(#[case] error: DomainError, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = DomainError::try_new(ErrorCode::IncorrectParameters, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
fn display_uses_message() {
    let error = DomainError::not_existing_entity("post 3 does not exist");
    assert_eq!(error.to_string(), "post 3 does not exist");
}

#[rstest]
fn serialises_code_in_snake_case() {
    let error = DomainError::already_existing("tag name taken")
        .with_details(json!({ "field": "tagName" }));

    let value = serde_json::to_value(&error).expect("error serialises");
    assert_eq!(
        value,
        json!({
            "code": "already_existing",
            "message": "tag name taken",
            "details": { "field": "tagName" },
        })
    );
}

#[rstest]
fn deserialisation_rejects_blank_messages() {
    let payload = json!({ "code": "unknown", "message": "  " });
    let result: Result<DomainError, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn all_lists_each_code_once() {
    let codes: std::collections::HashSet<ErrorCode> = ErrorCode::ALL.into_iter().collect();
    assert_eq!(codes.len(), ErrorCode::ALL.len());
}
