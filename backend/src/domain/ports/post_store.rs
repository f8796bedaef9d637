//! Port for post persistence and popularity ranking.

use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{NewPost, Post, PostId, RequiredText, UserId};

use super::StoreError;

/// Operations on the `posts` table.
///
/// Every read aggregates `likes` from `post_likes`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post stamped with `created_at`. An owner without a profile
    /// raises [`StoreError::ConstraintForeignKey`].
    async fn create(&self, post: &NewPost, created_at: DateTime<Utc>)
    -> Result<PostId, StoreError>;

    async fn find_by_id(&self, id: PostId) -> Result<Post, StoreError>;

    /// Posts by one owner, newest first.
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Post>, StoreError>;

    /// Posts created at or after `since`, most liked first.
    ///
    /// Ties are broken by creation time, newest first, then by id descending.
    async fn popular_since(
        &self,
        since: DateTime<Utc>,
        limit: NonZeroU32,
    ) -> Result<Vec<Post>, StoreError>;

    async fn update_title(&self, id: PostId, title: &RequiredText) -> Result<(), StoreError>;

    async fn update_description(
        &self,
        id: PostId,
        description: &RequiredText,
    ) -> Result<(), StoreError>;

    async fn update_content(&self, id: PostId, content: &RequiredText) -> Result<(), StoreError>;

    async fn delete(&self, id: PostId) -> Result<(), StoreError>;
}
