//! Posts and their derived like counter.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::UserId;
use super::validation::{RequiredText, ValidationError, define_entity_id};

define_entity_id! {
    /// Database identifier of a post.
    PostId => "post"
}

/// Stored post with its like count aggregated at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Database identifier.
    pub id: PostId,
    /// Author; the profile that published the post.
    pub owner_id: UserId,
    /// Headline.
    pub title: String,
    /// Short summary shown in listings.
    pub description: String,
    /// Body text.
    pub content: String,
    /// Creation time, stamped by the service clock.
    pub created_at: DateTime<Utc>,
    /// Number of likes, aggregated at read time.
    pub likes: u64,
}

/// Validated input for creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Author of the new post.
    pub owner_id: UserId,
    /// Headline.
    pub title: RequiredText,
    /// Short summary.
    pub description: RequiredText,
    /// Body text.
    pub content: RequiredText,
}

impl NewPost {
    /// Validate raw creation input.
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::NewPost;
    ///
    /// let post = NewPost::try_from_parts(1, "Hello", "desc", "content").unwrap();
    /// assert_eq!(post.title.as_str(), "Hello");
    /// assert!(NewPost::try_from_parts(1, "", "desc", "content").is_err());
    /// ```
    pub fn try_from_parts(
        owner_id: i64,
        title: &str,
        description: &str,
        content: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            owner_id: UserId::new(owner_id)?,
            title: RequiredText::new(title, "title")?,
            description: RequiredText::new(description, "description")?,
            content: RequiredText::new(content, "content")?,
        })
    }
}

/// Partial post update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostUpdate {
    /// Replacement headline.
    pub title: Option<RequiredText>,
    /// Replacement summary.
    pub description: Option<RequiredText>,
    /// Replacement body.
    pub content: Option<RequiredText>,
}

impl PostUpdate {
    /// Build an update from optional raw fields; empty strings count as absent.
    pub fn from_raw(
        title: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let field = |value: Option<&str>, name: &'static str| {
            value
                .filter(|raw| !raw.is_empty())
                .map(|raw| RequiredText::new(raw, name))
                .transpose()
        };

        Ok(Self {
            title: field(title, "title")?,
            description: field(description, "description")?,
            content: field(content, "content")?,
        })
    }

    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.content.is_none()
    }
}
