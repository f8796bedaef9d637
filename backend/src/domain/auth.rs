//! Authentication primitives: login credentials and presented tokens.
//!
//! Inbound adapters build these from raw strings so services only ever see
//! validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::validation::ValidationError;
use super::{Email, Password};

/// Validated email/password pair used for account creation and login.
///
/// # Examples
/// ```
/// use forum_backend::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("a@x.com", "secret").unwrap();
/// assert_eq!(creds.email().as_str(), "a@x.com");
/// assert_eq!(creds.password().expose(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Password,
}

impl Credentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }

    /// Email the caller signed in with.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Plaintext password, redacted in `Debug`.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Opaque bearer token presented by a caller.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Zeroizing<String>);

impl AccessToken {
    /// Wrap a raw token, rejecting blank input.
    pub fn new(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyField { field: "token" });
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Expose the raw token to a decoder.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(**redacted**)")
    }
}
