//! Post authoring, likes and popularity ranking.

use std::sync::Arc;

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{EdgeStore, PostStore};
use crate::domain::service_errors::{invalid_input, store_failure};
use crate::domain::{
    DomainError, Edge, EdgeService, NewPost, PopularityPolicy, PopularityWindow, Post, PostId,
    PostUpdate, RequiredText, UserId, ValidationError,
};

/// Post service.
#[derive(Clone)]
pub struct PostService<P, E> {
    posts: Arc<P>,
    edges: EdgeService<E>,
    clock: Arc<dyn Clock>,
    policy: PopularityPolicy,
}

impl<P, E> PostService<P, E> {
    /// Create a new service. `clock` stamps new posts and anchors
    /// popularity windows.
    pub fn new(
        posts: Arc<P>,
        edges: Arc<E>,
        clock: Arc<dyn Clock>,
        policy: PopularityPolicy,
    ) -> Self {
        Self {
            posts,
            edges: EdgeService::new(edges),
            clock,
            policy,
        }
    }
}

impl<P, E> PostService<P, E>
where
    P: PostStore,
    E: EdgeStore,
{
    /// Publish a post for an existing profile and return its id.
    pub async fn create(
        &self,
        owner_id: i64,
        title: &str,
        description: &str,
        content: &str,
    ) -> Result<PostId, DomainError> {
        let post =
            NewPost::try_from_parts(owner_id, title, description, content).map_err(invalid_input)?;
        let created_at = self.clock.utc();
        self.posts
            .create(&post, created_at)
            .await
            .map_err(|err| store_failure(format_args!("post by {}", post.owner_id), err))
    }

    /// Fetch a post with its like count.
    pub async fn get_by_id(&self, id: i64) -> Result<Post, DomainError> {
        let id = PostId::new(id).map_err(invalid_input)?;
        self.posts
            .find_by_id(id)
            .await
            .map_err(|err| store_failure(format_args!("post {id}"), err))
    }

    /// Posts by one owner, newest first.
    pub async fn get_by_owner(&self, owner_id: i64) -> Result<Vec<Post>, DomainError> {
        let owner_id = UserId::new(owner_id).map_err(invalid_input)?;
        self.posts
            .find_by_owner(owner_id)
            .await
            .map_err(|err| store_failure(format_args!("posts by {owner_id}"), err))
    }

    /// Most liked posts created within `window`, capped by the policy limit.
    pub async fn popular(&self, window: PopularityWindow) -> Result<Vec<Post>, DomainError> {
        let since = window.since(self.clock.utc());
        let limit = self.policy.limit();
        debug!(?window, %since, limit = limit.get(), "ranking popular posts");
        self.posts
            .popular_since(since, limit)
            .await
            .map_err(|err| store_failure(format_args!("popular posts since {since}"), err))
    }

    /// Replace the title.
    pub async fn update_title(&self, id: i64, title: &str) -> Result<(), DomainError> {
        let id = PostId::new(id).map_err(invalid_input)?;
        let title = RequiredText::new(title, "title").map_err(invalid_input)?;
        self.apply_title(id, &title).await
    }

    /// Replace the description.
    pub async fn update_description(&self, id: i64, description: &str) -> Result<(), DomainError> {
        let id = PostId::new(id).map_err(invalid_input)?;
        let description = RequiredText::new(description, "description").map_err(invalid_input)?;
        self.apply_description(id, &description).await
    }

    /// Replace the body.
    pub async fn update_content(&self, id: i64, content: &str) -> Result<(), DomainError> {
        let id = PostId::new(id).map_err(invalid_input)?;
        let content = RequiredText::new(content, "content").map_err(invalid_input)?;
        self.apply_content(id, &content).await
    }

    /// Apply every field present in `update`, stopping at the first failure.
    pub async fn update(&self, id: i64, update: PostUpdate) -> Result<(), DomainError> {
        let id = PostId::new(id).map_err(invalid_input)?;
        if update.is_empty() {
            return Err(invalid_input(ValidationError::EmptyUpdate));
        }

        if let Some(title) = &update.title {
            self.apply_title(id, title).await?;
        }
        if let Some(description) = &update.description {
            self.apply_description(id, description).await?;
        }
        if let Some(content) = &update.content {
            self.apply_content(id, content).await?;
        }
        Ok(())
    }

    /// Delete a post; its comments and likes cascade.
    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let id = PostId::new(id).map_err(invalid_input)?;
        self.posts
            .delete(id)
            .await
            .map_err(|err| store_failure(format_args!("post {id}"), err))
    }

    /// Record that `liker_id` likes the post; repeats are `AlreadyExisting`.
    pub async fn add_like(&self, liker_id: i64, post_id: i64) -> Result<(), DomainError> {
        let edge = like_edge(liker_id, post_id)?;
        self.edges.add(edge).await
    }

    /// Withdraw a like; an absent like is `NotExistingEntity`.
    pub async fn delete_like(&self, liker_id: i64, post_id: i64) -> Result<(), DomainError> {
        let edge = like_edge(liker_id, post_id)?;
        self.edges.remove(edge).await
    }

    async fn apply_title(&self, id: PostId, title: &RequiredText) -> Result<(), DomainError> {
        self.posts
            .update_title(id, title)
            .await
            .map_err(|err| store_failure(format_args!("post {id}"), err))
    }

    async fn apply_description(
        &self,
        id: PostId,
        description: &RequiredText,
    ) -> Result<(), DomainError> {
        self.posts
            .update_description(id, description)
            .await
            .map_err(|err| store_failure(format_args!("post {id}"), err))
    }

    async fn apply_content(&self, id: PostId, content: &RequiredText) -> Result<(), DomainError> {
        self.posts
            .update_content(id, content)
            .await
            .map_err(|err| store_failure(format_args!("post {id}"), err))
    }
}

fn like_edge(liker_id: i64, post_id: i64) -> Result<Edge, DomainError> {
    Ok(Edge::PostLike {
        liker: UserId::new(liker_id).map_err(invalid_input)?,
        post: PostId::new(post_id).map_err(invalid_input)?,
    })
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
