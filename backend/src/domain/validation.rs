//! Input validation shared by every engagement service.
//!
//! Each check is a pure function of its input. Services run these before any
//! store call, so a validation failure never costs a storage round trip.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation failures for caller-supplied input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier was zero or negative.
    #[error("{entity} id must be a positive integer")]
    NonPositiveId { entity: &'static str },
    /// A required text field was empty once trimmed.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    /// Tag name contains characters outside `[A-Za-z0-9_]`.
    #[error("tag name may only contain letters, numbers, or underscores")]
    InvalidTagName,
    /// Tag name is longer than [`TAG_NAME_MAX`] characters.
    #[error("tag name must be at most {max} characters")]
    TagNameTooLong { max: usize },
    /// Email does not have a basic `local@domain.tld` shape.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// Email is longer than [`EMAIL_MAX`] characters.
    #[error("email must be at most {max} characters")]
    EmailTooLong { max: usize },
    /// Password was empty. Whitespace is significant and kept.
    #[error("password must not be empty")]
    EmptyPassword,
    /// A partial update carried no fields.
    #[error("update must change at least one field")]
    EmptyUpdate,
}

impl ValidationError {
    /// Name of the offending input, used for structured error details.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveId { entity } => entity,
            Self::EmptyField { field } => field,
            Self::InvalidTagName | Self::TagNameTooLong { .. } => "tagName",
            Self::InvalidEmail | Self::EmailTooLong { .. } => "email",
            Self::EmptyPassword => "password",
            Self::EmptyUpdate => "update",
        }
    }
}

/// Maximum allowed length for a tag name.
pub const TAG_NAME_MAX: usize = 64;

/// Maximum allowed length for an email address; matches `users.email`.
pub const EMAIL_MAX: usize = 320;

static TAG_NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn tag_name_regex() -> &'static Regex {
    TAG_NAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("tag name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return `true` when `value` looks like an email address.
pub fn is_email_format(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Return `true` when `value` is a non-empty alphanumeric identifier.
pub fn is_tag_name_format(value: &str) -> bool {
    tag_name_regex().is_match(value)
}

/// Reject values that are empty once trimmed.
pub fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(())
}

/// Non-empty text stored verbatim.
///
/// ## Invariants
/// - The value is not empty once trimmed of whitespace. Surrounding whitespace
///   is kept as the caller wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredText(String);

impl RequiredText {
    /// Validate `value`, naming `field` in the error.
    pub fn new(value: impl Into<String>, field: &'static str) -> Result<Self, ValidationError> {
        let value = value.into();
        require_text(&value, field)?;
        Ok(Self(value))
    }

    /// Borrow the text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for RequiredText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates a positive `i64` identifier newtype.
macro_rules! define_entity_id {
    (
        $(#[$outer:meta])*
        $name:ident => $entity:literal
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(raw: i64) -> Result<Self, $crate::domain::ValidationError> {
                if raw <= 0 {
                    return Err($crate::domain::ValidationError::NonPositiveId { entity: $entity });
                }
                Ok(Self(raw))
            }

            /// Raw identifier as stored in the database.
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = $crate::domain::ValidationError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

pub(crate) use define_entity_id;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@x.com", true)]
    #[case("first.last+tag@mail.example.org", true)]
    #[case("no-at-sign.com", false)]
    #[case("a@x", false)]
    #[case("a@x.c", false)]
    #[case("", false)]
    #[case(" a@x.com", false)]
    fn email_shape(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_email_format(input), expected);
    }

    #[rstest]
    #[case("alice", true)]
    #[case("Bob_42", true)]
    #[case("", false)]
    #[case("with space", false)]
    #[case("dash-name", false)]
    #[case("a@x.com", false)]
    fn tag_name_shape(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_tag_name_format(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn required_text_rejects_blank(#[case] input: &str) {
        let err = RequiredText::new(input, "title").expect_err("blank text must fail");
        assert_eq!(err, ValidationError::EmptyField { field: "title" });
        assert_eq!(err.field(), "title");
    }

    #[rstest]
    fn required_text_keeps_surrounding_whitespace() {
        let text = RequiredText::new("  hello ", "content").expect("valid text");
        assert_eq!(text.as_str(), "  hello ");
    }
}
