//! Port for profile persistence and follow-graph reads.

use async_trait::async_trait;

use crate::domain::{Profile, ProfileSelector, RequiredText, TagName, UserId};

use super::StoreError;

/// Operations on the `profiles` table.
///
/// Reads return follower and follow counts aggregated from the `follows`
/// table. List reads that match nothing return
/// [`StoreError::EmptySelection`] rather than an empty vector.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Insert a profile keyed by its user id.
    ///
    /// An unknown user raises [`StoreError::ConstraintForeignKey`]; a taken
    /// tag name or an existing profile raises [`StoreError::ConstraintUnique`].
    async fn create(
        &self,
        user_id: UserId,
        tag_name: &TagName,
        display_name: &RequiredText,
    ) -> Result<UserId, StoreError>;

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Profile, StoreError>;

    async fn find_by_tag_name(&self, tag_name: &TagName) -> Result<Profile, StoreError>;

    /// Profiles following the selected profile.
    async fn followers_of(&self, selector: &ProfileSelector) -> Result<Vec<Profile>, StoreError>;

    /// Profiles the selected profile follows.
    async fn follows_of(&self, selector: &ProfileSelector) -> Result<Vec<Profile>, StoreError>;

    async fn update_tag_name(&self, user_id: UserId, tag_name: &TagName)
    -> Result<(), StoreError>;

    async fn update_display_name(
        &self,
        user_id: UserId,
        display_name: &RequiredText,
    ) -> Result<(), StoreError>;

    async fn update_picture_path(
        &self,
        user_id: UserId,
        picture_path: &RequiredText,
    ) -> Result<(), StoreError>;

    async fn update_background_path(
        &self,
        user_id: UserId,
        background_path: &RequiredText,
    ) -> Result<(), StoreError>;

    async fn delete(&self, user_id: UserId) -> Result<(), StoreError>;
}
