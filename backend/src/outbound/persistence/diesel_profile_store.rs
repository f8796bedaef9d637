//! PostgreSQL-backed `ProfileStore` implementation using Diesel ORM.
//!
//! Writes go through the query DSL. Reads use `sql_query` so the follower and
//! follow counts are aggregated in the same statement as the profile row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProfileStore, StoreError};
use crate::domain::{Profile, ProfileSelector, RequiredText, TagName, UserId};

use super::diesel_helpers::{
    bounded, corrupt_row, count, expect_affected, expect_rows, map_diesel_error, map_pool_error,
};
use super::models::{NewProfileRow, ProfileRow};
use super::pool::DbPool;
use super::schema::profiles;

const PROFILE_COLUMNS: &str = "p.user_id, p.display_name, p.tag_name, p.picture_path, \
     p.background_path, \
     (SELECT COUNT(*) FROM follows fr WHERE fr.followed_id = p.user_id) AS followers, \
     (SELECT COUNT(*) FROM follows fs WHERE fs.follower_id = p.user_id) AS follows";

/// Which side of the follow edge a graph read returns.
#[derive(Debug, Clone, Copy)]
enum FollowSide {
    /// Profiles following the selected one.
    Followers,
    /// Profiles the selected one follows.
    Follows,
}

impl FollowSide {
    /// Column joined to the returned profiles and column matched against the
    /// selected profile.
    fn columns(self) -> (&'static str, &'static str) {
        match self {
            Self::Followers => ("follower_id", "followed_id"),
            Self::Follows => ("followed_id", "follower_id"),
        }
    }

    fn operation(self) -> &'static str {
        match self {
            Self::Followers => "list followers",
            Self::Follows => "list follows",
        }
    }
}

fn graph_query(side: FollowSide, selector: &ProfileSelector) -> String {
    let (joined, matched) = side.columns();
    let anchor = match selector {
        ProfileSelector::Id(_) => "$1",
        ProfileSelector::TagName(_) => "(SELECT user_id FROM profiles WHERE tag_name = $1)",
    };
    format!(
        "SELECT {PROFILE_COLUMNS} FROM follows f \
         JOIN profiles p ON p.user_id = f.{joined} \
         WHERE f.{matched} = {anchor} \
         ORDER BY f.followed_at DESC, p.user_id ASC"
    )
}

/// Diesel-backed implementation of the [`ProfileStore`] port.
#[derive(Clone)]
pub struct DieselProfileStore {
    pool: DbPool,
}

impl DieselProfileStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn follow_graph(
        &self,
        side: FollowSide,
        selector: &ProfileSelector,
    ) -> Result<Vec<Profile>, StoreError> {
        let operation = side.operation();
        bounded(self.pool.query_timeout(), operation, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let query = diesel::sql_query(graph_query(side, selector));
            let rows: Vec<ProfileRow> = match selector {
                ProfileSelector::Id(id) => {
                    query.bind::<BigInt, _>(id.get()).load::<ProfileRow>(&mut conn).await
                }
                ProfileSelector::TagName(tag_name) => {
                    query
                        .bind::<Text, _>(tag_name.as_str())
                        .load::<ProfileRow>(&mut conn)
                        .await
                }
            }
            .map_err(|err| map_diesel_error(err, operation))?;

            expect_rows(rows)?.into_iter().map(row_to_profile).collect()
        })
        .await
    }
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, StoreError> {
    Ok(Profile {
        user_id: UserId::new(row.user_id).map_err(|err| corrupt_row("profiles", err))?,
        display_name: row.display_name,
        tag_name: TagName::new(row.tag_name).map_err(|err| corrupt_row("profiles", err))?,
        picture_path: row.picture_path,
        background_path: row.background_path,
        followers: count(row.followers, "followers")?,
        follows: count(row.follows, "follows")?,
    })
}

#[async_trait]
impl ProfileStore for DieselProfileStore {
    async fn create(
        &self,
        user_id: UserId,
        tag_name: &TagName,
        display_name: &RequiredText,
    ) -> Result<UserId, StoreError> {
        bounded(self.pool.query_timeout(), "insert profile", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewProfileRow {
                user_id: user_id.get(),
                tag_name: tag_name.as_str(),
                display_name: display_name.as_str(),
            };

            diesel::insert_into(profiles::table)
                .values(&row)
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "insert profile"))?;
            Ok(user_id)
        })
        .await
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Profile, StoreError> {
        bounded(self.pool.query_timeout(), "find profile by id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: ProfileRow = diesel::sql_query(format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles p WHERE p.user_id = $1"
            ))
            .bind::<BigInt, _>(user_id.get())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find profile by id"))?;
            row_to_profile(row)
        })
        .await
    }

    async fn find_by_tag_name(&self, tag_name: &TagName) -> Result<Profile, StoreError> {
        bounded(self.pool.query_timeout(), "find profile by tag name", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: ProfileRow = diesel::sql_query(format!(
                "SELECT {PROFILE_COLUMNS} FROM profiles p WHERE p.tag_name = $1"
            ))
            .bind::<Text, _>(tag_name.as_str())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "find profile by tag name"))?;
            row_to_profile(row)
        })
        .await
    }

    async fn followers_of(&self, selector: &ProfileSelector) -> Result<Vec<Profile>, StoreError> {
        self.follow_graph(FollowSide::Followers, selector).await
    }

    async fn follows_of(&self, selector: &ProfileSelector) -> Result<Vec<Profile>, StoreError> {
        self.follow_graph(FollowSide::Follows, selector).await
    }

    async fn update_tag_name(
        &self,
        user_id: UserId,
        tag_name: &TagName,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update profile tag name", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(profiles::table.filter(profiles::user_id.eq(user_id.get())))
                .set(profiles::tag_name.eq(tag_name.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update profile tag name"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn update_display_name(
        &self,
        user_id: UserId,
        display_name: &RequiredText,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update profile display name", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(profiles::table.filter(profiles::user_id.eq(user_id.get())))
                .set(profiles::display_name.eq(display_name.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update profile display name"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn update_picture_path(
        &self,
        user_id: UserId,
        picture_path: &RequiredText,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update profile picture", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(profiles::table.filter(profiles::user_id.eq(user_id.get())))
                .set(profiles::picture_path.eq(picture_path.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update profile picture"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn update_background_path(
        &self,
        user_id: UserId,
        background_path: &RequiredText,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update profile background", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(profiles::table.filter(profiles::user_id.eq(user_id.get())))
                .set(profiles::background_path.eq(background_path.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update profile background"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn delete(&self, user_id: UserId) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "delete profile", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(profiles::table.filter(profiles::user_id.eq(user_id.get())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "delete profile"))?;
            expect_affected(rows)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn followers_query_joins_on_follower_column() {
        let selector = ProfileSelector::Id(UserId::new(1).expect("user id"));
        let sql = graph_query(FollowSide::Followers, &selector);
        assert!(sql.contains("JOIN profiles p ON p.user_id = f.follower_id"));
        assert!(sql.contains("WHERE f.followed_id = $1"));
    }

    #[rstest]
    fn follows_by_tag_name_resolves_the_anchor_in_sql() {
        let selector = ProfileSelector::TagName(TagName::new("alice").expect("tag name"));
        let sql = graph_query(FollowSide::Follows, &selector);
        assert!(sql.contains("JOIN profiles p ON p.user_id = f.followed_id"));
        assert!(sql.contains("f.follower_id = (SELECT user_id FROM profiles WHERE tag_name = $1)"));
    }

    #[rstest]
    fn negative_counts_are_store_failures() {
        let row = ProfileRow {
            user_id: 1,
            display_name: "Alice".to_owned(),
            tag_name: "alice".to_owned(),
            picture_path: String::new(),
            background_path: String::new(),
            followers: -1,
            follows: 0,
        };
        assert!(matches!(row_to_profile(row), Err(StoreError::Unknown { .. })));
    }
}
