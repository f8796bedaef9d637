//! Ownership check guarding every mutation.
//!
//! The check is stateless: decode the presented token, compare its subject
//! with the resource owner, then confirm the subject still exists.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{TokenDecoder, UserStore};
use crate::domain::service_errors::{invalid_input, store_failure};
use crate::domain::{AccessToken, DomainError, UserId};

/// Authorization service.
#[derive(Clone)]
pub struct AuthorizationService<U, T> {
    users: Arc<U>,
    tokens: Arc<T>,
}

impl<U, T> AuthorizationService<U, T> {
    /// Create a service over the user store and token decoder.
    pub fn new(users: Arc<U>, tokens: Arc<T>) -> Self {
        Self { users, tokens }
    }
}

impl<U, T> AuthorizationService<U, T>
where
    U: UserStore,
    T: TokenDecoder,
{
    /// Confirm `token` was issued to `owner_id` and return that id.
    ///
    /// A blank, undecodable or foreign token is `NotValidCredentials`; a
    /// subject whose account was deleted is `NotExistingEntity`.
    ///
    /// # Examples
    /// ```no_run
    /// # async fn guard<U, T>(auth: &forum_backend::domain::AuthorizationService<U, T>)
    /// #     -> Result<(), forum_backend::domain::DomainError>
    /// # where
    /// #     U: forum_backend::domain::ports::UserStore,
    /// #     T: forum_backend::domain::ports::TokenDecoder,
    /// # {
    /// let caller = auth.authorize("eyJhbGciOi...", 7).await?;
    /// assert_eq!(caller.get(), 7);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn authorize(&self, token: &str, owner_id: i64) -> Result<UserId, DomainError> {
        let owner_id = UserId::new(owner_id).map_err(invalid_input)?;
        let token = AccessToken::new(token).map_err(|err| {
            debug!(error = %err, "blank token presented");
            DomainError::not_valid_credentials("a valid access token is required")
        })?;

        let subject = self.tokens.decode(&token).map_err(|err| {
            debug!(error = %err, "token rejected by decoder");
            DomainError::not_valid_credentials("access token is not valid")
        })?;
        if subject != owner_id {
            debug!(%subject, %owner_id, "token subject does not own resource");
            return Err(DomainError::not_valid_credentials(
                "access token does not grant access to this resource",
            ));
        }

        self.users
            .find_by_id(subject)
            .await
            .map_err(|err| store_failure(format_args!("user {subject}"), err))?;
        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{MockTokenDecoder, MockUserStore, StoreError, TokenDecodeError};
    use crate::domain::{Email, ErrorCode, HashedPassword, User};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn user_id(raw: i64) -> UserId {
        UserId::new(raw).expect("valid user id")
    }

    fn decoding_to(subject: i64) -> MockTokenDecoder {
        let mut tokens = MockTokenDecoder::new();
        tokens
            .expect_decode()
            .withf(|token| token.expose() == "token-1")
            .return_once(move |_| Ok(user_id(subject)));
        tokens
    }

    fn existing(id: i64) -> MockUserStore {
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .with(eq(user_id(id)))
            .return_once(move |_| {
                Ok(User::new(
                    user_id(id),
                    Email::new("a@x.com").expect("email"),
                    HashedPassword::new("hash"),
                    Utc::now(),
                ))
            });
        users
    }

    #[tokio::test]
    async fn owner_with_matching_token_is_authorized() {
        let service = AuthorizationService::new(Arc::new(existing(7)), Arc::new(decoding_to(7)));
        let caller = service.authorize("token-1", 7).await.expect("authorized");
        assert_eq!(caller, user_id(7));
    }

    #[tokio::test]
    async fn mismatched_subject_is_rejected_without_lookup() {
        let service =
            AuthorizationService::new(Arc::new(MockUserStore::new()), Arc::new(decoding_to(8)));
        let err = service
            .authorize("token-1", 7)
            .await
            .expect_err("foreign token must fail");
        assert_eq!(err.code(), ErrorCode::NotValidCredentials);
    }

    #[rstest]
    #[case(TokenDecodeError::invalid("signature mismatch"))]
    #[case(TokenDecodeError::bad_subject("abc"))]
    #[tokio::test]
    async fn undecodable_tokens_are_invalid_credentials(#[case] failure: TokenDecodeError) {
        let mut tokens = MockTokenDecoder::new();
        tokens.expect_decode().return_once(move |_| Err(failure));

        let service = AuthorizationService::new(Arc::new(MockUserStore::new()), Arc::new(tokens));
        let err = service
            .authorize("token-1", 7)
            .await
            .expect_err("bad token must fail");
        assert_eq!(err.code(), ErrorCode::NotValidCredentials);
    }

    #[tokio::test]
    async fn blank_token_is_invalid_credentials() {
        let service = AuthorizationService::new(
            Arc::new(MockUserStore::new()),
            Arc::new(MockTokenDecoder::new()),
        );
        let err = service
            .authorize("  ", 7)
            .await
            .expect_err("blank token must fail");
        assert_eq!(err.code(), ErrorCode::NotValidCredentials);
    }

    #[tokio::test]
    async fn deleted_subject_is_not_existing() {
        let mut users = MockUserStore::new();
        users
            .expect_find_by_id()
            .return_once(|_| Err(StoreError::empty_selection()));

        let service = AuthorizationService::new(Arc::new(users), Arc::new(decoding_to(7)));
        let err = service
            .authorize("token-1", 7)
            .await
            .expect_err("deleted user must fail");
        assert_eq!(err.code(), ErrorCode::NotExistingEntity);
    }

    #[tokio::test]
    async fn invalid_owner_id_is_incorrect_parameters() {
        let service = AuthorizationService::new(
            Arc::new(MockUserStore::new()),
            Arc::new(MockTokenDecoder::new()),
        );
        let err = service
            .authorize("token-1", 0)
            .await
            .expect_err("invalid owner must fail");
        assert_eq!(err.code(), ErrorCode::IncorrectParameters);
    }
}
