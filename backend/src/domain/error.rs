//! Domain-level error types.
//!
//! These errors are transport agnostic. Services translate every storage
//! failure into one of these codes before returning, so callers never see a
//! backend-specific error shape. Inbound adapters map them to HTTP responses
//! or any other protocol-specific envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Caller input failed local validation; storage was never consulted.
    IncorrectParameters,
    /// A unique attribute (email, tag name, like or follow pair) is taken.
    AlreadyExisting,
    /// A referenced entity required by the operation does not exist.
    DependencyNotSatisfied,
    /// The addressed entity does not exist.
    NotExistingEntity,
    /// Presented credentials or tokens do not match.
    NotValidCredentials,
    /// The credential hasher failed to produce a hash.
    PasswordUnableToHash,
    /// An unexpected failure occurred below the domain boundary.
    Unknown,
}

impl ErrorCode {
    /// Every code, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::IncorrectParameters,
        Self::AlreadyExisting,
        Self::DependencyNotSatisfied,
        Self::NotExistingEntity,
        Self::NotValidCredentials,
        Self::PasswordUnableToHash,
        Self::Unknown,
    ];
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use forum_backend::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::not_existing_entity("post 7 does not exist");
/// assert_eq!(err.code(), ErrorCode::NotExistingEntity);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "DomainErrorDto", into = "DomainErrorDto")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainErrorValidationError {
    /// The message was blank once trimmed.
    EmptyMessage,
}

impl std::fmt::Display for DomainErrorValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "error message must not be empty"),
        }
    }
}

impl std::error::Error for DomainErrorValidationError {}

impl DomainError {
    /// Create a new error, panicking if validation fails.
    ///
    /// # Panics
    ///
    /// Panics when `message` is blank; constructors in this crate always pass
    /// literal or formatted non-empty messages.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        match Self::try_new(code, message) {
            Ok(value) => value,
            Err(err) => panic!("error messages must satisfy validation: {err}"),
        }
    }

    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::DomainError;
    /// use serde_json::json;
    ///
    /// let err = DomainError::incorrect_parameters("bad tag name")
    ///     .with_details(json!({ "field": "tagName" }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::IncorrectParameters`].
    pub fn incorrect_parameters(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IncorrectParameters, message)
    }

    /// Convenience constructor for [`ErrorCode::AlreadyExisting`].
    pub fn already_existing(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AlreadyExisting, message)
    }

    /// Convenience constructor for [`ErrorCode::DependencyNotSatisfied`].
    pub fn dependency_not_satisfied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DependencyNotSatisfied, message)
    }

    /// Convenience constructor for [`ErrorCode::NotExistingEntity`].
    pub fn not_existing_entity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotExistingEntity, message)
    }

    /// Convenience constructor for [`ErrorCode::NotValidCredentials`].
    pub fn not_valid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotValidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::PasswordUnableToHash`].
    pub fn password_unable_to_hash(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PasswordUnableToHash, message)
    }

    /// Convenience constructor for [`ErrorCode::Unknown`].
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unknown, message)
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<DomainError> for DomainErrorDto {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code,
            message: value.message,
            details: value.details,
        }
    }
}

impl TryFrom<DomainErrorDto> for DomainError {
    type Error = DomainErrorValidationError;

    fn try_from(value: DomainErrorDto) -> Result<Self, Self::Error> {
        let DomainErrorDto {
            code,
            message,
            details,
        } = value;

        let mut error = DomainError::try_new(code, message)?;
        error.details = details;
        Ok(error)
    }
}

#[cfg(test)]
mod tests;
