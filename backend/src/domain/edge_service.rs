//! Generic add/remove for like and follow edges.
//!
//! Post likes, comment likes and follows all go through this one path, so
//! their validation and error mapping cannot drift apart.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::EdgeStore;
use crate::domain::service_errors::store_failure;
use crate::domain::{DomainError, Edge};

/// Edge mutations shared by the profile, post and comment services.
#[derive(Clone)]
pub struct EdgeService<E> {
    edges: Arc<E>,
}

impl<E> EdgeService<E> {
    /// Wrap the edge store.
    pub fn new(edges: Arc<E>) -> Self {
        Self { edges }
    }
}

impl<E: EdgeStore> EdgeService<E> {
    /// Insert `edge`.
    ///
    /// A repeated edge is `AlreadyExisting`; a missing endpoint is
    /// `DependencyNotSatisfied`.
    pub async fn add(&self, edge: Edge) -> Result<(), DomainError> {
        self.edges
            .add(edge)
            .await
            .map_err(|err| store_failure(edge, err))?;
        debug!(%edge, "edge added");
        Ok(())
    }

    /// Delete `edge`; `NotExistingEntity` when it was absent.
    pub async fn remove(&self, edge: Edge) -> Result<(), DomainError> {
        self.edges
            .remove(edge)
            .await
            .map_err(|err| store_failure(edge, err))?;
        debug!(%edge, "edge removed");
        Ok(())
    }
}
