//! Account registration, credential checks and account maintenance.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::ports::{CredentialHasher, CredentialHasherError, UserStore};
use crate::domain::service_errors::{invalid_input, store_failure};
use crate::domain::{Credentials, DomainError, Email, HashedPassword, Password, User, UserId};

/// User account service.
#[derive(Clone)]
pub struct UserService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
}

impl<U, H> UserService<U, H> {
    /// Create a new service with the given store and hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<U, H> UserService<U, H>
where
    U: UserStore,
    H: CredentialHasher + 'static,
{
    /// Register an account and return its id.
    ///
    /// The password is hashed before the store is called. A taken email is
    /// [`ErrorCode::AlreadyExisting`](crate::domain::ErrorCode::AlreadyExisting).
    pub async fn create_user(&self, email: &str, password: &str) -> Result<UserId, DomainError> {
        let credentials = Credentials::try_from_parts(email, password).map_err(invalid_input)?;
        let hashed = self.hash(credentials.password().clone()).await?;

        self.users
            .create(credentials.email(), &hashed)
            .await
            .map_err(|err| store_failure(format_args!("user {}", credentials.email()), err))
    }

    /// Fetch a user by id.
    pub async fn get_by_id(&self, id: i64) -> Result<User, DomainError> {
        let id = UserId::new(id).map_err(invalid_input)?;
        self.users
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(format_args!("user {id}"), err))
    }

    /// Fetch a user by login email.
    pub async fn get_by_email(&self, email: &str) -> Result<User, DomainError> {
        let email = Email::new(email).map_err(invalid_input)?;
        self.users
            .find_by_email(&email)
            .await
            .map_err(|err| store_failure(format_args!("user {email}"), err))
    }

    /// Verify a login attempt and return the authenticated user id.
    ///
    /// An unregistered email is
    /// [`ErrorCode::NotExistingEntity`](crate::domain::ErrorCode::NotExistingEntity);
    /// a wrong password is
    /// [`ErrorCode::NotValidCredentials`](crate::domain::ErrorCode::NotValidCredentials).
    /// Transports that must not reveal which emails are registered should
    /// collapse both into one response.
    pub async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserId, DomainError> {
        let credentials = Credentials::try_from_parts(email, password).map_err(invalid_input)?;
        let user = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(|err| store_failure(format_args!("user {}", credentials.email()), err))?;

        let matches = self
            .verify(credentials.password().clone(), user.hashed_password().clone())
            .await?;
        if !matches {
            debug!(user_id = %user.id(), "password did not match stored hash");
            return Err(DomainError::not_valid_credentials("email or password is incorrect"));
        }
        Ok(user.id())
    }

    /// Change the login email; a taken address is `AlreadyExisting`.
    pub async fn update_email(&self, id: i64, email: &str) -> Result<(), DomainError> {
        let id = UserId::new(id).map_err(invalid_input)?;
        let email = Email::new(email).map_err(invalid_input)?;
        self.users
            .update_email(id, &email)
            .await
            .map_err(|err| store_failure(format_args!("user {id}"), err))
    }

    /// Replace the stored hash with a hash of `password`.
    pub async fn update_password(&self, id: i64, password: &str) -> Result<(), DomainError> {
        let id = UserId::new(id).map_err(invalid_input)?;
        let password = Password::new(password).map_err(invalid_input)?;
        let hashed = self.hash(password).await?;
        self.users
            .update_hashed_password(id, &hashed)
            .await
            .map_err(|err| store_failure(format_args!("user {id}"), err))
    }

    /// Delete an account. Its profile, posts, comments and edges cascade.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let id = UserId::new(id).map_err(invalid_input)?;
        self.users
            .delete(id)
            .await
            .map_err(|err| store_failure(format_args!("user {id}"), err))
    }

    async fn hash(&self, password: Password) -> Result<HashedPassword, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| {
                error!(error = %err, "credential hashing task failed");
                DomainError::password_unable_to_hash("password could not be hashed")
            })?
            .map_err(|err| {
                error!(error = %err, "credential hasher rejected password");
                DomainError::password_unable_to_hash("password could not be hashed")
            })
    }

    async fn verify(
        &self,
        password: Password,
        hashed: HashedPassword,
    ) -> Result<bool, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hashed))
            .await
            .map_err(|err| {
                error!(error = %err, "credential verification task failed");
                DomainError::unknown("credentials could not be verified")
            })?
            .map_err(map_verify_error)
    }
}

fn map_verify_error(err: CredentialHasherError) -> DomainError {
    error!(error = %err, "stored credential could not be verified");
    DomainError::unknown("credentials could not be verified")
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
