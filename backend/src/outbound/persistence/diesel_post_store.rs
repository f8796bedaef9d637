//! PostgreSQL-backed `PostStore` implementation using Diesel ORM.
//!
//! Like counts are aggregated from `post_likes` on every read.

use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Timestamptz};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostStore, StoreError};
use crate::domain::{NewPost, Post, PostId, RequiredText, UserId};

use super::diesel_helpers::{
    bounded, corrupt_row, count, expect_affected, expect_rows, map_diesel_error, map_pool_error,
};
use super::models::{NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::posts;

const POST_SELECT: &str = "SELECT p.id, p.owner_id, p.title, p.description, p.content, \
     p.created_at, COUNT(l.liker_id) AS likes \
     FROM posts p LEFT JOIN post_likes l ON l.post_id = p.id";

/// Diesel-backed implementation of the [`PostStore`] port.
#[derive(Clone)]
pub struct DieselPostStore {
    pool: DbPool,
}

impl DieselPostStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_post(row: PostRow) -> Result<Post, StoreError> {
    Ok(Post {
        id: PostId::new(row.id).map_err(|err| corrupt_row("posts", err))?,
        owner_id: UserId::new(row.owner_id).map_err(|err| corrupt_row("posts", err))?,
        title: row.title,
        description: row.description,
        content: row.content,
        created_at: row.created_at,
        likes: count(row.likes, "likes")?,
    })
}

fn rows_to_posts(rows: Vec<PostRow>) -> Result<Vec<Post>, StoreError> {
    expect_rows(rows)?.into_iter().map(row_to_post).collect()
}

#[async_trait]
impl PostStore for DieselPostStore {
    async fn create(
        &self,
        post: &NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<PostId, StoreError> {
        bounded(self.pool.query_timeout(), "insert post", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewPostRow {
                owner_id: post.owner_id.get(),
                title: post.title.as_str(),
                description: post.description.as_str(),
                content: post.content.as_str(),
                created_at,
            };

            let id: i64 = diesel::insert_into(posts::table)
                .values(&row)
                .returning(posts::id)
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "insert post"))?;
            PostId::new(id).map_err(|err| corrupt_row("posts", err))
        })
        .await
    }

    async fn find_by_id(&self, id: PostId) -> Result<Post, StoreError> {
        bounded(self.pool.query_timeout(), "find post by id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: PostRow =
                diesel::sql_query(format!("{POST_SELECT} WHERE p.id = $1 GROUP BY p.id"))
                    .bind::<BigInt, _>(id.get())
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(err, "find post by id"))?;
            row_to_post(row)
        })
        .await
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<Post>, StoreError> {
        bounded(self.pool.query_timeout(), "list posts by owner", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<PostRow> = diesel::sql_query(format!(
                "{POST_SELECT} WHERE p.owner_id = $1 GROUP BY p.id \
                 ORDER BY p.created_at DESC, p.id DESC"
            ))
            .bind::<BigInt, _>(owner_id.get())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list posts by owner"))?;
            rows_to_posts(rows)
        })
        .await
    }

    async fn popular_since(
        &self,
        since: DateTime<Utc>,
        limit: NonZeroU32,
    ) -> Result<Vec<Post>, StoreError> {
        bounded(self.pool.query_timeout(), "rank popular posts", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<PostRow> = diesel::sql_query(format!(
                "{POST_SELECT} WHERE p.created_at >= $1 GROUP BY p.id \
                 ORDER BY likes DESC, p.created_at DESC, p.id DESC LIMIT $2"
            ))
            .bind::<Timestamptz, _>(since)
            .bind::<BigInt, _>(i64::from(limit.get()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "rank popular posts"))?;
            rows_to_posts(rows)
        })
        .await
    }

    async fn update_title(&self, id: PostId, title: &RequiredText) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update post title", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(posts::table.filter(posts::id.eq(id.get())))
                .set(posts::title.eq(title.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update post title"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn update_description(
        &self,
        id: PostId,
        description: &RequiredText,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update post description", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(posts::table.filter(posts::id.eq(id.get())))
                .set(posts::description.eq(description.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update post description"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn update_content(&self, id: PostId, content: &RequiredText) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update post content", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(posts::table.filter(posts::id.eq(id.get())))
                .set(posts::content.eq(content.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update post content"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "delete post", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(posts::table.filter(posts::id.eq(id.get())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "delete post"))?;
            expect_affected(rows)
        })
        .await
    }
}
