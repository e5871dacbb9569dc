use std::time::Duration;

use crate::cache::expiring_cache::ExpiringCache;

/// Encoded results of cacheable calls, keyed by request fingerprint.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    entries: ExpiringCache<Vec<u8>>,
}

impl ResponseCache {
    pub fn new(gc_interval_seconds: u64) -> Self {
        Self { entries: ExpiringCache::new(Duration::from_secs(gc_interval_seconds)) }
    }

    pub async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.get(key).await
    }

    pub async fn set(&self, key: &str, value: Vec<u8>, ttl_seconds: u64) {
        self.entries.set(key, value, Duration::from_secs(ttl_seconds)).await
    }

    pub async fn entry_ttl(&self, key: &str) -> Option<Duration> {
        self.entries.entry_ttl(key).await
    }
}
