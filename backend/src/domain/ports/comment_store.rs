//! Port for comment persistence.

use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, PostId, RequiredText, UserId};

use super::StoreError;

/// Operations on the `comments` table. List reads are sorted by likes,
/// most liked first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create(&self, comment: &NewComment) -> Result<CommentId, StoreError>;

    async fn find_by_id(&self, id: CommentId) -> Result<Comment, StoreError>;

    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError>;

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, StoreError>;

    async fn update_content(&self, id: CommentId, content: &RequiredText)
    -> Result<(), StoreError>;

    async fn delete(&self, id: CommentId) -> Result<(), StoreError>;
}
