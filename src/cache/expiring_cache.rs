use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::helpers::time::get_instant;

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    ttl: Duration,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Longest ttl an entry is stored with; longer ones are clamped.
pub const MAX_ENTRY_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

type Entries<V> = Arc<RwLock<HashMap<String, CacheEntry<V>>>>;

/// Key -> value store where every entry carries its own ttl.
///
/// Expired entries are never returned: reads drop them lazily and a background
/// sweeper (spawned when a tokio runtime is available) removes the rest every
/// `gc_interval`. There is no explicit delete, entries only leave by expiry or
/// by being overwritten.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    inner: Entries<V>,
}

impl<V> Clone for ExpiringCache<V> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<V> ExpiringCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(gc_interval: Duration) -> Self {
        let cache = Self { inner: Arc::new(RwLock::new(HashMap::new())) };
        cache.spawn_sweeper(gc_interval);
        cache
    }

    /// Get value if it exists and is not expired
    pub async fn get(&self, key: &str) -> Option<V> {
        let now = get_instant();
        {
            let map = self.inner.read().await;
            match map.get(key) {
                None => return None,
                Some(entry) if !entry.is_expired(now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }
        // expired: drop it unless a writer replaced it meanwhile
        let mut map = self.inner.write().await;
        if map.get(key).is_some_and(|entry| entry.is_expired(now)) {
            map.remove(key);
        }
        None
    }

    /// Insert or overwrite; a zero ttl stores nothing, a ttl above
    /// [`MAX_ENTRY_TTL`] is clamped to it.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        if ttl.is_zero() {
            return;
        }
        let ttl = ttl.min(MAX_ENTRY_TTL);
        let Some(expires_at) = get_instant().checked_add(ttl) else {
            return;
        };
        let entry = CacheEntry { value, ttl, expires_at };
        self.inner.write().await.insert(key.into(), entry);
    }

    /// The ttl a live entry was stored with.
    pub async fn entry_ttl(&self, key: &str) -> Option<Duration> {
        let now = get_instant();
        self.inner
            .read()
            .await
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.ttl)
    }

    /// Number of stored entries, expired ones not yet swept included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn purge_expired(&self) -> usize {
        purge(&self.inner).await
    }

    fn spawn_sweeper(&self, gc_interval: Duration) {
        if gc_interval.is_zero() {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no tokio runtime, cache sweeper disabled");
            return;
        };
        let weak: Weak<RwLock<HashMap<String, CacheEntry<V>>>> = Arc::downgrade(&self.inner);
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(gc_interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                let removed = purge(&inner).await;
                if removed > 0 {
                    debug!("cache sweep removed {} expired entries", removed);
                }
            }
        });
    }
}

async fn purge<V>(inner: &Entries<V>) -> usize {
    let now = get_instant();
    let mut map = inner.write().await;
    let before = map.len();
    map.retain(|_, entry| !entry.is_expired(now));
    before - map.len()
}
