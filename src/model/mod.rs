//! Payload shapes exchanged with the authorization service.
//!
//! Field names follow the remote JSON contract: authorize endpoints use
//! PascalCase keys, OAuth2 endpoints use snake_case keys.

pub mod identity;
pub mod params;
pub mod token;
pub mod user;
