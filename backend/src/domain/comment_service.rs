//! Comment authoring and comment likes.

use std::sync::Arc;

use crate::domain::ports::{CommentStore, EdgeStore};
use crate::domain::service_errors::{invalid_input, store_failure};
use crate::domain::{
    Comment, CommentId, DomainError, Edge, EdgeService, NewComment, PostId, RequiredText, UserId,
};

/// Comment service.
#[derive(Clone)]
pub struct CommentService<C, E> {
    comments: Arc<C>,
    edges: EdgeService<E>,
}

impl<C, E> CommentService<C, E> {
    /// Create a new service with the given stores.
    pub fn new(comments: Arc<C>, edges: Arc<E>) -> Self {
        Self {
            comments,
            edges: EdgeService::new(edges),
        }
    }
}

impl<C, E> CommentService<C, E>
where
    C: CommentStore,
    E: EdgeStore,
{
    /// Comment on an existing post as an existing profile.
    pub async fn create(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<CommentId, DomainError> {
        let comment = NewComment::try_from_parts(post_id, user_id, content).map_err(invalid_input)?;
        self.comments.create(&comment).await.map_err(|err| {
            store_failure(
                format_args!("comment by {} on post {}", comment.user_id, comment.post_id),
                err,
            )
        })
    }

    /// Fetch a comment with its like count.
    pub async fn get_by_id(&self, id: i64) -> Result<Comment, DomainError> {
        let id = CommentId::new(id).map_err(invalid_input)?;
        self.comments
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(format_args!("comment {id}"), err))
    }

    /// Comments on a post, most liked first.
    pub async fn get_by_post(&self, post_id: i64) -> Result<Vec<Comment>, DomainError> {
        let post_id = PostId::new(post_id).map_err(invalid_input)?;
        self.comments
            .find_by_post(post_id)
            .await
            .map_err(|err| store_failure(format_args!("comments on post {post_id}"), err))
    }

    /// Comments by a profile, most liked first.
    pub async fn get_by_user(&self, user_id: i64) -> Result<Vec<Comment>, DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        self.comments
            .find_by_user(user_id)
            .await
            .map_err(|err| store_failure(format_args!("comments by {user_id}"), err))
    }

    /// Replace the comment text.
    pub async fn update_content(&self, id: i64, content: &str) -> Result<(), DomainError> {
        let id = CommentId::new(id).map_err(invalid_input)?;
        let content = RequiredText::new(content, "content").map_err(invalid_input)?;
        self.comments
            .update_content(id, &content)
            .await
            .map_err(|err| store_failure(format_args!("comment {id}"), err))
    }

    /// Delete the comment and its likes.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let id = CommentId::new(id).map_err(invalid_input)?;
        self.comments
            .delete(id)
            .await
            .map_err(|err| store_failure(format_args!("comment {id}"), err))
    }

    /// Record that `liker_id` likes the comment.
    pub async fn add_like(&self, liker_id: i64, comment_id: i64) -> Result<(), DomainError> {
        let edge = like_edge(liker_id, comment_id)?;
        self.edges.add(edge).await
    }

    /// Withdraw a comment like.
    pub async fn delete_like(&self, liker_id: i64, comment_id: i64) -> Result<(), DomainError> {
        let edge = like_edge(liker_id, comment_id)?;
        self.edges.remove(edge).await
    }
}

fn like_edge(liker_id: i64, comment_id: i64) -> Result<Edge, DomainError> {
    Ok(Edge::CommentLike {
        liker: UserId::new(liker_id).map_err(invalid_input)?,
        comment: CommentId::new(comment_id).map_err(invalid_input)?,
    })
}
