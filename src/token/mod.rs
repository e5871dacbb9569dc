//! Service credential supply.

use crate::error::error_result::ErrorResult;
use crate::model::token::TokenRecord;

pub mod token_handle;

/// Supplies the bearer token injected into authorize calls.
///
/// Implementations are responsible for their own refresh and locking; the
/// dispatcher calls them concurrently without extra synchronisation.
pub trait TokenProvider: Send + Sync + 'static {
    /// A valid token, cached or freshly fetched.
    fn get(&self) -> impl std::future::Future<Output = Result<String, ErrorResult>> + Send;

    /// Bypass any cached token and fetch a new one.
    fn force_get(&self) -> impl std::future::Future<Output = Result<TokenRecord, ErrorResult>> + Send;
}
