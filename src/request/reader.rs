use serde::Serialize;
use serde_json::{Map, Value};

/// Optional capability of a request body that makes its calls cacheable.
pub trait RequestReader {
    /// Cache ttl in seconds for the given endpoint; `<= 0` disables caching.
    fn expires(&self, router: &str) -> i64;
    /// Fingerprint of the cache relevant fields; empty disables caching.
    fn hash(&self) -> String;
}

/// Anything that can be sent as a JSON body.
///
/// Bodies are uncacheable unless they expose a [`RequestReader`].
pub trait RequestBody: Serialize + Send + Sync {
    fn reader(&self) -> Option<&dyn RequestReader> {
        None
    }
}

impl RequestBody for Value {}

impl RequestBody for Map<String, Value> {}

/// Where a cacheable call lives in the response cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSlot {
    pub key: String,
    pub ttl_seconds: u64,
}

impl CacheSlot {
    /// Evaluated per call, the same body may be cacheable for one endpoint only.
    pub fn resolve(router: &str, reader: &dyn RequestReader) -> Option<Self> {
        let ttl = reader.expires(router);
        if ttl <= 0 {
            return None;
        }
        let key = reader.hash();
        if key.is_empty() {
            return None;
        }
        Some(Self { key, ttl_seconds: ttl as u64 })
    }
}
