use std::time::Duration;

use crate::cache::expiring_cache::ExpiringCache;
use crate::model::identity::VerifiedIdentity;

/// Token verification results keyed by the raw token string.
///
/// Lives apart from the response cache so a token can never collide with a
/// request fingerprint.
#[derive(Debug, Clone)]
pub struct VerificationCache {
    entries: ExpiringCache<VerifiedIdentity>,
    margin_seconds: u64,
}

impl VerificationCache {
    /// `gc_interval_seconds` is both the sweep interval and the margin
    /// removed from the remote token lifetime.
    pub fn new(gc_interval_seconds: u64) -> Self {
        Self {
            entries: ExpiringCache::new(Duration::from_secs(gc_interval_seconds)),
            margin_seconds: gc_interval_seconds,
        }
    }

    pub async fn get(&self, token: &str) -> Option<VerifiedIdentity> {
        self.entries.get(token).await
    }

    /// Ttl of a verification whose remote token lives `expires_in` more
    /// seconds; `None` when the remaining lifetime does not exceed the margin.
    pub fn ttl_for(&self, expires_in: i64) -> Option<Duration> {
        let margin = i64::try_from(self.margin_seconds).unwrap_or(i64::MAX);
        if expires_in > margin {
            Some(Duration::from_secs((expires_in - margin) as u64))
        } else {
            None
        }
    }

    /// Store the identity if the ttl rule allows it. Returns whether it was stored.
    pub async fn remember(&self, token: &str, identity: VerifiedIdentity, expires_in: i64) -> bool {
        match self.ttl_for(expires_in) {
            Some(ttl) => {
                self.entries.set(token, identity, ttl).await;
                true
            }
            None => false,
        }
    }

    pub async fn entry_ttl(&self, token: &str) -> Option<Duration> {
        self.entries.entry_ttl(token).await
    }
}
