//! # Authorization Service Client
//!
//! Talks to the authorization service on behalf of one calling service:
//! obtains and renews the service bearer token, sends token authenticated
//! requests, verifies end-user tokens and caches the results of the
//! cacheable calls.
//!
//! Modules:
//! - `authorize` — the client handle and every remote operation
//! - `cache` — ttl caches for responses, verifications and the service token
//! - `dispatch` — request execution and result decoding
//! - `token` — service token provider
//! - `transport` — outbound HTTP

pub mod authorize;
pub mod cache;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod helpers;
pub mod model;
pub mod observability;
pub mod request;
pub mod token;
pub mod transport;
pub mod utils;

#[cfg(test)]
pub mod tests;

pub use crate::authorize::handle::AuthorizeHandle;
pub use crate::config::settings::ClientConfig;
pub use crate::error::error_result::{ErrorKind, ErrorResult};
pub use crate::model::identity::VerifyTokenInfo;
pub use crate::request::reader::{RequestBody, RequestReader};
