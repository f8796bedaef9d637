//! Shared helpers for the engagement integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`; each
//! suite pulls these helpers in with `mod support;`.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

pub mod cluster_skip;
pub mod embedded_postgres;

pub use cluster_skip::handle_cluster_setup_failure;
pub use embedded_postgres::{ForumDatabase, provision_forum_database};
