//! The authorization service client and its operations.

pub mod handle;
pub mod oauth;
pub mod staff;
pub mod users;
pub mod verify;
