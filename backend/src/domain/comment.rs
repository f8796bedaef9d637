//! Comments attached to posts.

use serde::Serialize;

use super::validation::{RequiredText, ValidationError, define_entity_id};
use super::{PostId, UserId};

define_entity_id! {
    /// Database identifier of a comment.
    CommentId => "comment"
}

/// Stored comment with its like count aggregated at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Database identifier.
    pub id: CommentId,
    /// Post the comment belongs to.
    pub post_id: PostId,
    /// Author profile.
    pub user_id: UserId,
    /// Comment text.
    pub content: String,
    /// Number of likes, aggregated at read time.
    pub likes: u64,
}

/// Validated input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Post being commented on.
    pub post_id: PostId,
    /// Author profile.
    pub user_id: UserId,
    /// Comment text.
    pub content: RequiredText,
}

impl NewComment {
    /// Validate raw creation input.
    pub fn try_from_parts(
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            post_id: PostId::new(post_id)?,
            user_id: UserId::new(user_id)?,
            content: RequiredText::new(content, "content")?,
        })
    }
}
