//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! Routing and handlers live with the hosting process; this crate provides
//! the HTTP error envelope under [`http`].

pub mod http;
