//! Port for decoding caller-presented access tokens.
//!
//! Token issuance and signing live outside this crate; the authorization
//! check only needs "token in, subject out".

use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token decoder adapters.
    pub enum TokenDecodeError {
        /// Signature, expiry or format check failed.
        Invalid { reason: String } => "token rejected: {reason}",
        /// The token's subject is not a valid user id.
        BadSubject { subject: String } => "token subject is not a user id: {subject}",
    }
}

/// Resolves an access token to the user it was issued to.
#[cfg_attr(test, mockall::automock)]
pub trait TokenDecoder: Send + Sync {
    /// Return the user id the token was issued for.
    fn decode(&self, token: &AccessToken) -> Result<UserId, TokenDecodeError>;
}
