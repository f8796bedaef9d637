//! HTTP inbound adapter support.

pub mod error;
