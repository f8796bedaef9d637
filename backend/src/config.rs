//! Engagement layer configuration loaded via OrthoConfig.
//!
//! Values layer from defaults, a configuration file, `FORUM_*` environment
//! variables and command-line flags. Unset options fall back to the
//! defaults exposed by the accessors below.

use std::num::NonZeroU32;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_POPULAR_LIMIT, PopularityPolicy};
use crate::outbound::hashing::{BcryptCredentialHasher, DEFAULT_BCRYPT_COST};
use crate::outbound::persistence::{DEFAULT_QUERY_TIMEOUT, PoolConfig};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/forum";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_MIN_IDLE: u32 = 2;
const DEFAULT_CONNECTION_TIMEOUT_MS: u64 = 30_000;

/// Settings for the storage pool, popularity ranking and credential hashing.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FORUM")]
pub struct EngagementSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections kept open.
    pub pool_min_idle: Option<u32>,
    /// Connection checkout timeout in milliseconds.
    pub connection_timeout_ms: Option<u64>,
    /// Upper bound for a single store operation in milliseconds.
    pub query_timeout_ms: Option<u64>,
    /// Number of posts returned by popularity queries.
    pub popular_limit: Option<u32>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
}

impl EngagementSettings {
    /// PostgreSQL connection URL; empty when unset.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Per-operation store deadline.
    pub fn query_timeout(&self) -> Duration {
        self.query_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_QUERY_TIMEOUT)
    }

    /// Pool configuration with every unset value defaulted.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.database_url())
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(Some(self.pool_min_idle.unwrap_or(DEFAULT_POOL_MIN_IDLE)))
            .with_connection_timeout(Duration::from_millis(
                self.connection_timeout_ms
                    .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_MS),
            ))
            .with_query_timeout(self.query_timeout())
    }

    /// Popularity policy; a zero limit falls back to the default.
    pub fn popularity_policy(&self) -> PopularityPolicy {
        let limit = self
            .popular_limit
            .and_then(NonZeroU32::new)
            .unwrap_or(DEFAULT_POPULAR_LIMIT);
        PopularityPolicy::new(limit)
    }

    /// Bcrypt hasher at the configured cost.
    pub fn credential_hasher(&self) -> BcryptCredentialHasher {
        BcryptCredentialHasher::new(self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST))
    }
}
