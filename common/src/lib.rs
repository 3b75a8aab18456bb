//! Shared building blocks for the database viewer: wire models, the error
//! type, configuration and request-id generation.

pub mod config;
pub mod errors;
pub mod models;
pub mod response;
pub mod utils;

/// Header carrying the per-request identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
