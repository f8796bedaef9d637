//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Store ports are driven by the engagement services and implemented by the
//! Diesel adapters in `outbound::persistence`. The hasher and token decoder
//! ports isolate credential mechanics from the services.

mod macros;
pub(crate) use macros::define_port_error;

mod comment_store;
mod credential_hasher;
mod edge_store;
mod post_store;
mod profile_store;
mod store_error;
mod token_decoder;
mod user_store;

pub use comment_store::CommentStore;
#[cfg(test)]
pub use comment_store::MockCommentStore;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use edge_store::EdgeStore;
#[cfg(test)]
pub use edge_store::MockEdgeStore;
#[cfg(test)]
pub use post_store::MockPostStore;
pub use post_store::PostStore;
#[cfg(test)]
pub use profile_store::MockProfileStore;
pub use profile_store::ProfileStore;
pub use store_error::StoreError;
#[cfg(test)]
pub use token_decoder::MockTokenDecoder;
pub use token_decoder::{TokenDecodeError, TokenDecoder};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::UserStore;
