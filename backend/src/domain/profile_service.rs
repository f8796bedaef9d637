//! Profile lifecycle and follow-graph use cases.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{EdgeStore, ProfileStore};
use crate::domain::service_errors::{invalid_input, store_failure};
use crate::domain::{
    DomainError, Edge, EdgeService, Profile, ProfileSelector, ProfileUpdate, RequiredText,
    TagName, UserId, ValidationError,
};

/// Profile service.
#[derive(Clone)]
pub struct ProfileService<P, E> {
    profiles: Arc<P>,
    edges: EdgeService<E>,
}

impl<P, E> ProfileService<P, E> {
    /// Create a new service with the given stores.
    pub fn new(profiles: Arc<P>, edges: Arc<E>) -> Self {
        Self {
            profiles,
            edges: EdgeService::new(edges),
        }
    }
}

impl<P, E> ProfileService<P, E>
where
    P: ProfileStore,
    E: EdgeStore,
{
    /// Create the profile for an existing user and return its id.
    ///
    /// A missing user is `DependencyNotSatisfied`; a taken tag name, or a
    /// user that already has a profile, is `AlreadyExisting`.
    pub async fn create(
        &self,
        user_id: i64,
        tag_name: &str,
        display_name: &str,
    ) -> Result<UserId, DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        let tag_name = TagName::new(tag_name).map_err(invalid_input)?;
        let display_name = RequiredText::new(display_name, "displayName").map_err(invalid_input)?;

        self.profiles
            .create(user_id, &tag_name, &display_name)
            .await
            .map_err(|err| store_failure(format_args!("profile @{tag_name}"), err))
    }

    /// Fetch a profile with follower and follow counts.
    pub async fn get_by_user_id(&self, user_id: i64) -> Result<Profile, DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        self.profiles
            .find_by_user_id(user_id)
            .await
            .map_err(|err| store_failure(format_args!("profile {user_id}"), err))
    }

    /// Fetch a profile by its unique tag name.
    pub async fn get_by_tag_name(&self, tag_name: &str) -> Result<Profile, DomainError> {
        let tag_name = TagName::new(tag_name).map_err(invalid_input)?;
        self.profiles
            .find_by_tag_name(&tag_name)
            .await
            .map_err(|err| store_failure(format_args!("profile @{tag_name}"), err))
    }

    /// Profiles following the given user.
    ///
    /// An empty follower list is reported as `NotExistingEntity`.
    pub async fn followers_by_id(&self, user_id: i64) -> Result<Vec<Profile>, DomainError> {
        let selector = by_id(user_id)?;
        self.followers(selector).await
    }

    /// Profiles following the tagged profile, latest first.
    pub async fn followers_by_tag_name(&self, tag_name: &str) -> Result<Vec<Profile>, DomainError> {
        let selector = by_tag_name(tag_name)?;
        self.followers(selector).await
    }

    /// Profiles the given user follows.
    pub async fn follows_by_id(&self, user_id: i64) -> Result<Vec<Profile>, DomainError> {
        let selector = by_id(user_id)?;
        self.follows(selector).await
    }

    /// Profiles the tagged profile follows, latest first.
    pub async fn follows_by_tag_name(&self, tag_name: &str) -> Result<Vec<Profile>, DomainError> {
        let selector = by_tag_name(tag_name)?;
        self.follows(selector).await
    }

    /// Rename the tag; a taken tag is `AlreadyExisting`.
    pub async fn update_tag_name(&self, user_id: i64, tag_name: &str) -> Result<(), DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        let tag_name = TagName::new(tag_name).map_err(invalid_input)?;
        self.apply_tag_name(user_id, &tag_name).await
    }

    /// Replace the display name.
    pub async fn update_display_name(
        &self,
        user_id: i64,
        display_name: &str,
    ) -> Result<(), DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        let display_name = RequiredText::new(display_name, "displayName").map_err(invalid_input)?;
        self.apply_display_name(user_id, &display_name).await
    }

    /// Point the profile picture at `path`.
    pub async fn update_picture_path(&self, user_id: i64, path: &str) -> Result<(), DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        let path = RequiredText::new(path, "picturePath").map_err(invalid_input)?;
        self.apply_picture_path(user_id, &path).await
    }

    /// Point the background image at `path`.
    pub async fn update_background_path(
        &self,
        user_id: i64,
        path: &str,
    ) -> Result<(), DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        let path = RequiredText::new(path, "backgroundPath").map_err(invalid_input)?;
        self.apply_background_path(user_id, &path).await
    }

    /// Apply every field present in `update`, one store call per field.
    ///
    /// Fields are written in a fixed order (tag name, display name, picture,
    /// background) and the first failure stops the sequence; earlier fields
    /// stay written.
    pub async fn update(&self, user_id: i64, update: ProfileUpdate) -> Result<(), DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        if update.is_empty() {
            return Err(invalid_input(ValidationError::EmptyUpdate));
        }

        if let Some(tag_name) = &update.tag_name {
            self.apply_tag_name(user_id, tag_name).await?;
        }
        if let Some(display_name) = &update.display_name {
            self.apply_display_name(user_id, display_name).await?;
        }
        if let Some(path) = &update.picture_path {
            self.apply_picture_path(user_id, path).await?;
        }
        if let Some(path) = &update.background_path {
            self.apply_background_path(user_id, path).await?;
        }
        debug!(%user_id, "profile updated");
        Ok(())
    }

    /// Delete a profile; posts, comments and edges cascade.
    pub async fn delete(&self, user_id: i64) -> Result<(), DomainError> {
        let user_id = UserId::new(user_id).map_err(invalid_input)?;
        self.profiles
            .delete(user_id)
            .await
            .map_err(|err| store_failure(format_args!("profile {user_id}"), err))
    }

    /// `follower_id` starts following `followed_id`.
    pub async fn add_follow(&self, follower_id: i64, followed_id: i64) -> Result<(), DomainError> {
        let edge = follow_edge(follower_id, followed_id)?;
        self.edges.add(edge).await
    }

    /// `follower_id` stops following `followed_id`.
    pub async fn delete_follow(
        &self,
        follower_id: i64,
        followed_id: i64,
    ) -> Result<(), DomainError> {
        let edge = follow_edge(follower_id, followed_id)?;
        self.edges.remove(edge).await
    }

    async fn followers(&self, selector: ProfileSelector) -> Result<Vec<Profile>, DomainError> {
        self.profiles
            .followers_of(&selector)
            .await
            .map_err(|err| store_failure(format_args!("followers of {selector}"), err))
    }

    async fn follows(&self, selector: ProfileSelector) -> Result<Vec<Profile>, DomainError> {
        self.profiles
            .follows_of(&selector)
            .await
            .map_err(|err| store_failure(format_args!("follows of {selector}"), err))
    }

    async fn apply_tag_name(&self, user_id: UserId, tag_name: &TagName) -> Result<(), DomainError> {
        self.profiles
            .update_tag_name(user_id, tag_name)
            .await
            .map_err(|err| store_failure(format_args!("profile {user_id}"), err))
    }

    async fn apply_display_name(
        &self,
        user_id: UserId,
        display_name: &RequiredText,
    ) -> Result<(), DomainError> {
        self.profiles
            .update_display_name(user_id, display_name)
            .await
            .map_err(|err| store_failure(format_args!("profile {user_id}"), err))
    }

    async fn apply_picture_path(
        &self,
        user_id: UserId,
        path: &RequiredText,
    ) -> Result<(), DomainError> {
        self.profiles
            .update_picture_path(user_id, path)
            .await
            .map_err(|err| store_failure(format_args!("profile {user_id}"), err))
    }

    async fn apply_background_path(
        &self,
        user_id: UserId,
        path: &RequiredText,
    ) -> Result<(), DomainError> {
        self.profiles
            .update_background_path(user_id, path)
            .await
            .map_err(|err| store_failure(format_args!("profile {user_id}"), err))
    }
}

fn by_id(user_id: i64) -> Result<ProfileSelector, DomainError> {
    UserId::new(user_id)
        .map(ProfileSelector::Id)
        .map_err(invalid_input)
}

fn by_tag_name(tag_name: &str) -> Result<ProfileSelector, DomainError> {
    TagName::new(tag_name)
        .map(ProfileSelector::TagName)
        .map_err(invalid_input)
}

fn follow_edge(follower_id: i64, followed_id: i64) -> Result<Edge, DomainError> {
    Ok(Edge::Follow {
        follower: UserId::new(follower_id).map_err(invalid_input)?,
        followed: UserId::new(followed_id).map_err(invalid_input)?,
    })
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
