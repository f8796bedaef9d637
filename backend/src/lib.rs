//! Forum engagement data layer.
//!
//! Users, profiles, posts, comments and the like and follow edges between
//! them, persisted in PostgreSQL. The [`domain`] module holds entities, store
//! ports and services; [`outbound`] provides the Diesel and bcrypt adapters;
//! [`inbound`] maps domain errors onto HTTP responses.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod state_builders;

pub use config::EngagementSettings;
pub use state_builders::{EngagementServices, build_engagement_services};
