//! PostgreSQL-backed `CommentStore` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentStore, StoreError};
use crate::domain::{Comment, CommentId, NewComment, PostId, RequiredText, UserId};

use super::diesel_helpers::{
    bounded, corrupt_row, count, expect_affected, expect_rows, map_diesel_error, map_pool_error,
};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;

const COMMENT_SELECT: &str = "SELECT c.id, c.post_id, c.user_id, c.content, \
     COUNT(l.liker_id) AS likes \
     FROM comments c LEFT JOIN comment_likes l ON l.comment_id = c.id";

/// Most liked first; insertion order among equals.
const COMMENT_ORDER: &str = "GROUP BY c.id ORDER BY likes DESC, c.id ASC";

/// Diesel-backed implementation of the [`CommentStore`] port.
#[derive(Clone)]
pub struct DieselCommentStore {
    pool: DbPool,
}

impl DieselCommentStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn list_where(
        &self,
        column: &'static str,
        value: i64,
        operation: &'static str,
    ) -> Result<Vec<Comment>, StoreError> {
        bounded(self.pool.query_timeout(), operation, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows: Vec<CommentRow> = diesel::sql_query(format!(
                "{COMMENT_SELECT} WHERE c.{column} = $1 {COMMENT_ORDER}"
            ))
            .bind::<BigInt, _>(value)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, operation))?;
            expect_rows(rows)?.into_iter().map(row_to_comment).collect()
        })
        .await
    }
}

fn row_to_comment(row: CommentRow) -> Result<Comment, StoreError> {
    Ok(Comment {
        id: CommentId::new(row.id).map_err(|err| corrupt_row("comments", err))?,
        post_id: PostId::new(row.post_id).map_err(|err| corrupt_row("comments", err))?,
        user_id: UserId::new(row.user_id).map_err(|err| corrupt_row("comments", err))?,
        content: row.content,
        likes: count(row.likes, "likes")?,
    })
}

#[async_trait]
impl CommentStore for DieselCommentStore {
    async fn create(&self, comment: &NewComment) -> Result<CommentId, StoreError> {
        bounded(self.pool.query_timeout(), "insert comment", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewCommentRow {
                post_id: comment.post_id.get(),
                user_id: comment.user_id.get(),
                content: comment.content.as_str(),
            };

            let id: i64 = diesel::insert_into(comments::table)
                .values(&row)
                .returning(comments::id)
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "insert comment"))?;
            CommentId::new(id).map_err(|err| corrupt_row("comments", err))
        })
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> Result<Comment, StoreError> {
        bounded(self.pool.query_timeout(), "find comment by id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: CommentRow =
                diesel::sql_query(format!("{COMMENT_SELECT} WHERE c.id = $1 GROUP BY c.id"))
                    .bind::<BigInt, _>(id.get())
                    .get_result(&mut conn)
                    .await
                    .map_err(|err| map_diesel_error(err, "find comment by id"))?;
            row_to_comment(row)
        })
        .await
    }

    async fn find_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        self.list_where("post_id", post_id.get(), "list comments by post")
            .await
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Comment>, StoreError> {
        self.list_where("user_id", user_id.get(), "list comments by user")
            .await
    }

    async fn update_content(
        &self,
        id: CommentId,
        content: &RequiredText,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update comment content", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(comments::table.filter(comments::id.eq(id.get())))
                .set(comments::content.eq(content.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update comment content"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "delete comment", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(comments::table.filter(comments::id.eq(id.get())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "delete comment"))?;
            expect_affected(rows)
        })
        .await
    }
}
