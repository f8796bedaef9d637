//! PostgreSQL-backed `UserStore` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreError, UserStore};
use crate::domain::{Email, HashedPassword, User, UserId};

use super::diesel_helpers::{
    bounded, corrupt_row, expect_affected, map_diesel_error, map_pool_error,
};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

/// Diesel-backed implementation of the [`UserStore`] port.
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<User, StoreError> {
    let id = UserId::new(row.id).map_err(|err| corrupt_row("users", err))?;
    let email = Email::new(row.email).map_err(|err| corrupt_row("users", err))?;
    Ok(User::new(
        id,
        email,
        HashedPassword::new(row.hashed_password),
        row.registered_at,
    ))
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn create(
        &self,
        email: &Email,
        hashed_password: &HashedPassword,
    ) -> Result<UserId, StoreError> {
        bounded(self.pool.query_timeout(), "insert user", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row = NewUserRow {
                email: email.as_str(),
                hashed_password: hashed_password.as_str(),
            };

            let id: i64 = diesel::insert_into(users::table)
                .values(&row)
                .returning(users::id)
                .get_result(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "insert user"))?;
            UserId::new(id).map_err(|err| corrupt_row("users", err))
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> Result<User, StoreError> {
        bounded(self.pool.query_timeout(), "find user by id", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: UserRow = users::table
                .filter(users::id.eq(id.get()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "find user by id"))?;
            row_to_user(row)
        })
        .await
    }

    async fn find_by_email(&self, email: &Email) -> Result<User, StoreError> {
        bounded(self.pool.query_timeout(), "find user by email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let row: UserRow = users::table
                .filter(users::email.eq(email.as_str()))
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "find user by email"))?;
            row_to_user(row)
        })
        .await
    }

    async fn update_email(&self, id: UserId, email: &Email) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update user email", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(users::table.filter(users::id.eq(id.get())))
                .set(users::email.eq(email.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update user email"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn update_hashed_password(
        &self,
        id: UserId,
        hashed_password: &HashedPassword,
    ) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "update user password", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::update(users::table.filter(users::id.eq(id.get())))
                .set(users::hashed_password.eq(hashed_password.as_str()))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "update user password"))?;
            expect_affected(rows)
        })
        .await
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        bounded(self.pool.query_timeout(), "delete user", async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            let rows = diesel::delete(users::table.filter(users::id.eq(id.get())))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "delete user"))?;
            expect_affected(rows)
        })
        .await
    }
}
