//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::{Email, HashedPassword, User, UserId};

use super::StoreError;

/// Single-statement operations on the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A taken email raises [`StoreError::ConstraintUnique`].
    async fn create(
        &self,
        email: &Email,
        hashed_password: &HashedPassword,
    ) -> Result<UserId, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &Email) -> Result<User, StoreError>;

    async fn update_email(&self, id: UserId, email: &Email) -> Result<(), StoreError>;

    async fn update_hashed_password(
        &self,
        id: UserId,
        hashed_password: &HashedPassword,
    ) -> Result<(), StoreError>;

    /// Delete a user; the profile and everything it owns cascade.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;
}
