//! User account model.
//!
//! A user is the credential-bearing half of a forum member; the public half
//! is the [`Profile`](crate::domain::Profile) sharing the same id.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::validation::{EMAIL_MAX, ValidationError, define_entity_id, is_email_format};

define_entity_id! {
    /// Database identifier of a user. Profiles reuse it as their key.
    UserId => "user"
}

/// Email address with a basic `local@domain.tld` shape.
///
/// ## Invariants
/// - At most [`EMAIL_MAX`] characters.
/// - Matches the shape check in [`is_email_format`]. The value is not
///   trimmed or lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::Email;
    ///
    /// assert!(Email::new("a@x.com").is_ok());
    /// assert!(Email::new("not-an-email").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.chars().count() > EMAIL_MAX {
            return Err(ValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !is_email_format(&value) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Plaintext password supplied by a caller.
///
/// The buffer is zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Reject empty passwords; whitespace is kept as typed.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(value.to_owned())))
    }

    /// Expose the plaintext to a credential hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Output of a one-way credential hasher, as persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an encoded hash produced by a hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(**redacted**)")
    }
}

/// Stored user account.
///
/// The hashed credential is never serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: Email,
    #[serde(skip)]
    hashed_password: HashedPassword,
    registered_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from stored parts.
    pub fn new(
        id: UserId,
        email: Email,
        hashed_password: HashedPassword,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            hashed_password,
            registered_at,
        }
    }

    /// Database identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored credential hash.
    pub fn hashed_password(&self) -> &HashedPassword {
        &self.hashed_password
    }

    /// Registration time.
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }
}

#[cfg(test)]
mod tests;
