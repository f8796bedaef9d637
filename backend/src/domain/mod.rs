//! Domain primitives, ports and engagement services.
//!
//! Purpose: define the forum's strongly typed entities, the store ports the
//! persistence adapters implement, and the services that validate input,
//! orchestrate store calls and translate storage failures into [`DomainError`].
//!
//! Public surface:
//! - DomainError / ErrorCode: caller-visible failure vocabulary.
//! - User, Profile, Post, Comment, Edge: entities and join edges.
//! - UserService, ProfileService, PostService, CommentService,
//!   AuthorizationService: use cases over the store ports.

pub mod auth;
pub mod authorization;
pub mod comment;
pub mod comment_service;
pub mod edge;
pub mod edge_service;
pub mod error;
pub mod popularity;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod profile;
pub mod profile_service;
mod service_errors;
pub mod user;
pub mod user_service;
pub mod validation;

pub use self::auth::{AccessToken, Credentials};
pub use self::authorization::AuthorizationService;
pub use self::comment::{Comment, CommentId, NewComment};
pub use self::comment_service::CommentService;
pub use self::edge::{Edge, EdgeRelation};
pub use self::edge_service::EdgeService;
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::popularity::{DEFAULT_POPULAR_LIMIT, PopularityPolicy, PopularityWindow};
pub use self::post::{NewPost, Post, PostId, PostUpdate};
pub use self::post_service::PostService;
pub use self::profile::{Profile, ProfileSelector, ProfileUpdate, TagName};
pub use self::profile_service::ProfileService;
pub use self::user::{Email, HashedPassword, Password, User, UserId};
pub use self::user_service::UserService;
pub use self::validation::{RequiredText, ValidationError};

/// Convenient service result alias.
///
/// # Examples
/// ```
/// use forum_backend::domain::{DomainResult, DomainError};
///
/// fn lookup() -> DomainResult<()> {
///     Err(DomainError::not_existing_entity("post 3 does not exist"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, DomainError>;
