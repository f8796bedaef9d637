//! bcrypt-backed `CredentialHasher`.
//!
//! Hashes embed their own salt and cost, so verification works for hashes
//! produced under an earlier cost setting.

use tracing::warn;

use crate::domain::ports::{CredentialHasher, CredentialHasherError};
use crate::domain::{HashedPassword, Password};

/// Work factor used when no cost is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashes credentials with bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptCredentialHasher {
    cost: u32,
}

impl BcryptCredentialHasher {
    /// Create a hasher using `cost`. bcrypt accepts 4 through 31; other
    /// values surface as [`CredentialHasherError::Hash`] on first use.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Bcrypt work factor used for new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptCredentialHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl CredentialHasher for BcryptCredentialHasher {
    fn hash(&self, password: &Password) -> Result<HashedPassword, CredentialHasherError> {
        bcrypt::hash(password.expose(), self.cost)
            .map(HashedPassword::new)
            .map_err(|err| {
                warn!(cost = self.cost, error = %err, "bcrypt hashing failed");
                CredentialHasherError::hash(err.to_string())
            })
    }

    fn verify(
        &self,
        password: &Password,
        hashed: &HashedPassword,
    ) -> Result<bool, CredentialHasherError> {
        bcrypt::verify(password.expose(), hashed.as_str())
            .map_err(|err| CredentialHasherError::malformed_hash(err.to_string()))
    }
}
