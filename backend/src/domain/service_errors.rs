//! Translation from validation and storage failures into domain errors.
//!
//! Every engagement service funnels its failures through these helpers so
//! the mapping and its logging stay identical across entities.

use std::fmt::Display;

use serde_json::json;
use tracing::{debug, error};

use super::ports::StoreError;
use super::{DomainError, ValidationError};

/// Map a local validation failure to [`DomainError::incorrect_parameters`].
pub(crate) fn invalid_input(err: ValidationError) -> DomainError {
    debug!(field = err.field(), error = %err, "rejected invalid input");
    DomainError::incorrect_parameters(err.to_string()).with_details(json!({ "field": err.field() }))
}

/// Map a store failure for the operation on `subject`.
///
/// Recognised kinds map one to one; anything else collapses to
/// [`DomainError::unknown`] and is logged at error level with the backend detail.
pub(crate) fn store_failure(subject: impl Display, err: StoreError) -> DomainError {
    match err {
        StoreError::ConstraintUnique { constraint } => {
            debug!(%subject, %constraint, "unique constraint rejected write");
            DomainError::already_existing(format!("{subject} already exists"))
                .with_details(json!({ "constraint": constraint }))
        }
        StoreError::ConstraintForeignKey { constraint } => {
            debug!(%subject, %constraint, "foreign key rejected write");
            DomainError::dependency_not_satisfied(format!("{subject} references a missing entity"))
                .with_details(json!({ "constraint": constraint }))
        }
        StoreError::NoRowsAffected | StoreError::EmptySelection => {
            debug!(%subject, kind = %err, "no matching rows");
            DomainError::not_existing_entity(format!("{subject} does not exist"))
        }
        StoreError::Unknown { message } => {
            error!(%subject, %message, "store failure collapsed to unknown");
            DomainError::unknown("unexpected storage failure")
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(StoreError::constraint_unique("profiles_tag_name_key"), ErrorCode::AlreadyExisting)]
    #[case(StoreError::constraint_foreign_key("profiles_user_id_fkey"), ErrorCode::DependencyNotSatisfied)]
    #[case(StoreError::no_rows_affected(), ErrorCode::NotExistingEntity)]
    #[case(StoreError::empty_selection(), ErrorCode::NotExistingEntity)]
    #[case(StoreError::unknown("connection reset"), ErrorCode::Unknown)]
    fn every_store_kind_has_one_domain_code(#[case] err: StoreError, #[case] expected: ErrorCode) {
        assert_eq!(store_failure("profile 4", err).code(), expected);
    }

    #[rstest]
    fn unknown_failures_hide_backend_detail() {
        let mapped = store_failure("post 9", StoreError::unknown("relation \"posts\" is locked"));
        assert!(!mapped.message().contains("locked"));
        assert!(mapped.details().is_none());
    }

    #[rstest]
    fn constraint_names_travel_as_details() {
        let mapped = store_failure("user a@x.com", StoreError::constraint_unique("users_email_key"));
        assert_eq!(mapped.message(), "user a@x.com already exists");
        assert_eq!(
            mapped.details(),
            Some(&json!({ "constraint": "users_email_key" }))
        );
    }

    #[rstest]
    fn validation_failures_name_the_field() {
        let mapped = invalid_input(ValidationError::InvalidTagName);
        assert_eq!(mapped.code(), ErrorCode::IncorrectParameters);
        assert_eq!(mapped.details(), Some(&json!({ "field": "tagName" })));
    }
}
