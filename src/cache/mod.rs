pub mod expiring_cache;
pub mod response_cache;
pub mod token_context;
pub mod verification_cache;
