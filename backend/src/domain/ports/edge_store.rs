//! Port for like and follow edges.
//!
//! One port serves all three join tables; the [`Edge`] value selects the
//! table and columns.

use async_trait::async_trait;

use crate::domain::Edge;

use super::StoreError;

/// Insert and delete rows of the like and follow join tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EdgeStore: Send + Sync {
    /// Insert an edge.
    ///
    /// A repeated edge raises [`StoreError::ConstraintUnique`]; a missing
    /// endpoint raises [`StoreError::ConstraintForeignKey`].
    async fn add(&self, edge: Edge) -> Result<(), StoreError>;

    /// Delete an edge; [`StoreError::NoRowsAffected`] when it was absent.
    async fn remove(&self, edge: Edge) -> Result<(), StoreError>;
}
