//! PostgreSQL-backed `EdgeStore` implementation using Diesel ORM.
//!
//! The three join tables share one shape, so statements are rendered from
//! [`EdgeRelation`]'s static table and column names and both endpoints are
//! bound as parameters.

use async_trait::async_trait;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EdgeStore, StoreError};
use crate::domain::{Edge, EdgeRelation};

use super::diesel_helpers::{bounded, expect_affected, map_diesel_error, map_pool_error};
use super::pool::DbPool;

fn insert_sql(relation: EdgeRelation) -> String {
    format!(
        "INSERT INTO {} ({}, {}) VALUES ($1, $2)",
        relation.table(),
        relation.source_column(),
        relation.target_column()
    )
}

fn delete_sql(relation: EdgeRelation) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1 AND {} = $2",
        relation.table(),
        relation.source_column(),
        relation.target_column()
    )
}

/// Diesel-backed implementation of the [`EdgeStore`] port.
#[derive(Clone)]
pub struct DieselEdgeStore {
    pool: DbPool,
}

impl DieselEdgeStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn execute(
        &self,
        sql: String,
        edge: Edge,
        operation: &'static str,
    ) -> Result<usize, StoreError> {
        bounded(self.pool.query_timeout(), operation, async {
            let mut conn = self.pool.get().await.map_err(map_pool_error)?;
            diesel::sql_query(sql)
                .bind::<BigInt, _>(edge.source())
                .bind::<BigInt, _>(edge.target())
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, operation))
        })
        .await
    }
}

#[async_trait]
impl EdgeStore for DieselEdgeStore {
    async fn add(&self, edge: Edge) -> Result<(), StoreError> {
        self.execute(insert_sql(edge.relation()), edge, "insert edge")
            .await
            .map(|_| ())
    }

    async fn remove(&self, edge: Edge) -> Result<(), StoreError> {
        let rows = self
            .execute(delete_sql(edge.relation()), edge, "delete edge")
            .await?;
        expect_affected(rows)
    }
}
