//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain store ports
//! backed by PostgreSQL via the Diesel ORM with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: store implementations only translate between Diesel
//!   rows and domain types. Validation and error classification for callers
//!   live in the domain services.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) are never exposed to the domain layer.
//! - **Derived counters**: like, follower and follow counts are aggregated
//!   in the reading statement.
//! - **Bounded operations**: every store call, connection checkout included,
//!   runs under the pool's query timeout.
//!
//! # Example
//!
//! ```ignore
//! use forum_backend::outbound::persistence::{DbPool, DieselUserStore, PoolConfig};
//!
//! let config = PoolConfig::new("postgres://localhost/forum");
//! let pool = DbPool::new(config).await?;
//! let users = DieselUserStore::new(pool);
//! ```

mod diesel_comment_store;
mod diesel_edge_store;
mod diesel_helpers;
mod diesel_post_store;
mod diesel_profile_store;
mod diesel_user_store;
mod models;
mod pool;
mod schema;

pub use diesel_comment_store::DieselCommentStore;
pub use diesel_edge_store::DieselEdgeStore;
pub use diesel_post_store::DieselPostStore;
pub use diesel_profile_store::DieselProfileStore;
pub use diesel_user_store::DieselUserStore;
pub use pool::{DEFAULT_QUERY_TIMEOUT, DbPool, PoolConfig, PoolError};
