//! Public profile model and its follow-graph counters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;
use super::validation::{RequiredText, TAG_NAME_MAX, ValidationError, is_tag_name_format};

/// Unique public handle of a profile.
///
/// ## Invariants
/// - Non-empty, at most [`TAG_NAME_MAX`] characters.
/// - Only ASCII letters, digits and underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(String);

impl TagName {
    /// Validate and construct a [`TagName`].
    ///
    /// # Examples
    /// ```
    /// use forum_backend::domain::TagName;
    ///
    /// assert!(TagName::new("alice").is_ok());
    /// assert!(TagName::new("not valid").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::EmptyField { field: "tagName" });
        }
        if value.chars().count() > TAG_NAME_MAX {
            return Err(ValidationError::TagNameTooLong { max: TAG_NAME_MAX });
        }
        if !is_tag_name_format(&value) {
            return Err(ValidationError::InvalidTagName);
        }
        Ok(Self(value))
    }

    /// Borrow the handle.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TagName> for String {
    fn from(value: TagName) -> Self {
        value.0
    }
}

impl TryFrom<String> for TagName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Addresses a profile either by its user id or by its tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileSelector {
    /// Select by owning user id.
    Id(UserId),
    /// Select by unique tag name.
    TagName(TagName),
}

impl fmt::Display for ProfileSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "profile {id}"),
            Self::TagName(tag) => write!(f, "profile @{tag}"),
        }
    }
}

/// Profile as read from storage.
///
/// `followers` and `follows` are aggregated from follow edges on every read
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Owning user; profiles share the user id.
    pub user_id: UserId,
    /// Free-form name shown to other members.
    pub display_name: String,
    /// Unique handle.
    pub tag_name: TagName,
    /// Path of the profile picture; empty when unset.
    pub picture_path: String,
    /// Path of the background image; empty when unset.
    pub background_path: String,
    /// Profiles following this one.
    pub followers: u64,
    /// Profiles this one follows.
    pub follows: u64,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    /// Replacement handle.
    pub tag_name: Option<TagName>,
    /// Replacement display name.
    pub display_name: Option<RequiredText>,
    /// Replacement picture path.
    pub picture_path: Option<RequiredText>,
    /// Replacement background path.
    pub background_path: Option<RequiredText>,
}

impl ProfileUpdate {
    /// Build an update from optional raw fields.
    ///
    /// Empty strings count as absent, matching form submissions that send
    /// blank inputs for untouched fields.
    pub fn from_raw(
        tag_name: Option<&str>,
        display_name: Option<&str>,
        picture_path: Option<&str>,
        background_path: Option<&str>,
    ) -> Result<Self, ValidationError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|raw| !raw.is_empty())
        }

        Ok(Self {
            tag_name: present(tag_name).map(TagName::new).transpose()?,
            display_name: present(display_name)
                .map(|raw| RequiredText::new(raw, "displayName"))
                .transpose()?,
            picture_path: present(picture_path)
                .map(|raw| RequiredText::new(raw, "picturePath"))
                .transpose()?,
            background_path: present(background_path)
                .map(|raw| RequiredText::new(raw, "backgroundPath"))
                .transpose()?,
        })
    }

    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.tag_name.is_none()
            && self.display_name.is_none()
            && self.picture_path.is_none()
            && self.background_path.is_none()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", ValidationError::EmptyField { field: "tagName" })]
    #[case("two words", ValidationError::InvalidTagName)]
    #[case("émile", ValidationError::InvalidTagName)]
    fn tag_name_rejects_invalid_input(#[case] raw: &str, #[case] expected: ValidationError) {
        assert_eq!(TagName::new(raw), Err(expected));
    }

    #[rstest]
    fn tag_name_enforces_length() {
        let long = "a".repeat(TAG_NAME_MAX + 1);
        assert_eq!(
            TagName::new(long),
            Err(ValidationError::TagNameTooLong { max: TAG_NAME_MAX })
        );
        assert!(TagName::new("a".repeat(TAG_NAME_MAX)).is_ok());
    }

    #[rstest]
    fn update_treats_blank_strings_as_absent() {
        let update = ProfileUpdate::from_raw(Some(""), None, Some(""), None)
            .expect("blank fields are skipped");
        assert!(update.is_empty());
    }

    #[rstest]
    fn update_validates_present_fields() {
        let err = ProfileUpdate::from_raw(Some("bad tag"), None, None, None)
            .expect_err("invalid tag must fail");
        assert_eq!(err, ValidationError::InvalidTagName);

        let err = ProfileUpdate::from_raw(None, Some("   "), None, None)
            .expect_err("whitespace display name must fail");
        assert_eq!(err.field(), "displayName");
    }

    #[rstest]
    fn update_keeps_supplied_fields() {
        let update = ProfileUpdate::from_raw(Some("alice"), Some("Alice"), None, Some("/bg.png"))
            .expect("valid update");
        assert!(!update.is_empty());
        assert_eq!(update.tag_name.as_ref().map(TagName::as_str), Some("alice"));
        assert_eq!(
            update.background_path.as_ref().map(RequiredText::as_str),
            Some("/bg.png")
        );
        assert!(update.picture_path.is_none());
    }
}
