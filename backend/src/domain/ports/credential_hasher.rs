//! Port for one-way credential hashing.
//!
//! The algorithm is an adapter concern. Hashing is CPU bound, so the port
//! is synchronous and services call it directly.

use crate::domain::{HashedPassword, Password};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum CredentialHasherError {
        /// The hasher could not produce a hash.
        Hash { message: String } => "credential hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored credential hash is malformed: {message}",
    }
}

/// One-way salted hashing of plaintext passwords.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialHasher: Send + Sync {
    /// Produce a salted hash of `password`.
    fn hash(&self, password: &Password) -> Result<HashedPassword, CredentialHasherError>;

    /// Return `true` when `password` matches `hashed`.
    fn verify(
        &self,
        password: &Password,
        hashed: &HashedPassword,
    ) -> Result<bool, CredentialHasherError>;
}
