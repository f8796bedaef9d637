//! Builders wiring the Diesel stores into the engagement services.
//!
//! One [`DbPool`] is created and cloned into every store; services receive
//! their stores through constructor injection.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use crate::config::EngagementSettings;
use crate::domain::ports::TokenDecoder;
use crate::domain::{
    AuthorizationService, CommentService, PostService, ProfileService, UserService,
};
use crate::outbound::hashing::BcryptCredentialHasher;
use crate::outbound::persistence::{
    DbPool, DieselCommentStore, DieselEdgeStore, DieselPostStore, DieselProfileStore,
    DieselUserStore, PoolError,
};

/// User service backed by PostgreSQL and bcrypt.
pub type PgUserService = UserService<DieselUserStore, BcryptCredentialHasher>;
/// Profile service backed by PostgreSQL.
pub type PgProfileService = ProfileService<DieselProfileStore, DieselEdgeStore>;
/// Post service backed by PostgreSQL.
pub type PgPostService = PostService<DieselPostStore, DieselEdgeStore>;
/// Comment service backed by PostgreSQL.
pub type PgCommentService = CommentService<DieselCommentStore, DieselEdgeStore>;

/// Engagement services sharing one connection pool.
#[derive(Clone)]
pub struct EngagementServices {
    /// Registration, credential checks and account changes.
    pub users: PgUserService,
    /// Profiles and the follow graph.
    pub profiles: PgProfileService,
    /// Posts, post likes and popularity ranking.
    pub posts: PgPostService,
    /// Comments and comment likes.
    pub comments: PgCommentService,
    user_store: Arc<DieselUserStore>,
}

impl EngagementServices {
    /// Wire every service onto `pool`.
    pub fn from_pool(pool: DbPool, settings: &EngagementSettings) -> Self {
        let user_store = Arc::new(DieselUserStore::new(pool.clone()));
        let edges = Arc::new(DieselEdgeStore::new(pool.clone()));

        Self {
            users: UserService::new(
                Arc::clone(&user_store),
                Arc::new(settings.credential_hasher()),
            ),
            profiles: ProfileService::new(
                Arc::new(DieselProfileStore::new(pool.clone())),
                Arc::clone(&edges),
            ),
            posts: PostService::new(
                Arc::new(DieselPostStore::new(pool.clone())),
                Arc::clone(&edges),
                Arc::new(DefaultClock),
                settings.popularity_policy(),
            ),
            comments: CommentService::new(Arc::new(DieselCommentStore::new(pool)), edges),
            user_store,
        }
    }

    /// Authorization check over the shared user store and the given token
    /// decoder.
    pub fn authorization<T>(&self, tokens: Arc<T>) -> AuthorizationService<DieselUserStore, T>
    where
        T: TokenDecoder,
    {
        AuthorizationService::new(Arc::clone(&self.user_store), tokens)
    }
}

/// Build the connection pool described by `settings` and wire the services.
///
/// # Errors
///
/// Returns [`PoolError::Build`] when the pool cannot be constructed.
pub async fn build_engagement_services(
    settings: &EngagementSettings,
) -> Result<EngagementServices, PoolError> {
    let config = settings.pool_config();
    info!(?config, "building engagement services");
    let pool = DbPool::new(config).await?;
    Ok(EngagementServices::from_pool(pool, settings))
}
