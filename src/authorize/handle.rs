use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use http::Method;
use tracing::{debug, warn};

use crate::cache::response_cache::ResponseCache;
use crate::cache::verification_cache::VerificationCache;
use crate::config::settings::ClientConfig;
use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::sink::ResultSink;
use crate::error::error_result::ErrorResult;
use crate::observability::metrics::{get_metrics, CACHE_ROUTER, LOOKUP_HIT, LOOKUP_MISS, LOOKUP_SKIP};
use crate::request::reader::{CacheSlot, RequestBody};
use crate::token::token_handle::TokenHandle;
use crate::token::TokenProvider;
use crate::transport::reqwest_transport::ReqwestTransport;
use crate::transport::Transport;
use crate::utils::constants::ACCESS_TOKEN_HEADER;

/// Client of the authorization service.
///
/// Owns both caches for its whole lifetime; clones share them together with
/// the transport and the token provider.
pub struct AuthorizeHandle<T: Transport = ReqwestTransport, P: TokenProvider = TokenHandle<T>> {
    pub(crate) cfg: Arc<ClientConfig>,
    pub(crate) dispatcher: Dispatcher<T>,
    pub(crate) tokens: Arc<P>,
    /// fingerprint -> encoded result
    pub(crate) router_cache: Option<ResponseCache>,
    /// raw token -> verified identity
    pub(crate) verify_cache: Option<VerificationCache>,
}

impl<T: Transport, P: TokenProvider> Clone for AuthorizeHandle<T, P> {
    fn clone(&self) -> Self {
        Self {
            cfg: self.cfg.clone(),
            dispatcher: self.dispatcher.clone(),
            tokens: self.tokens.clone(),
            router_cache: self.router_cache.clone(),
            verify_cache: self.verify_cache.clone(),
        }
    }
}

impl AuthorizeHandle {
    /// Client over reqwest with the client credentials token provider.
    pub fn new(cfg: ClientConfig) -> Result<Self> {
        let cfg = Arc::new(cfg.normalized());
        let transport = Arc::new(ReqwestTransport::new(Duration::from_millis(cfg.timeout_ms))?);
        let tokens = Arc::new(TokenHandle::new(cfg.clone(), transport.clone()));
        Ok(Self::from_parts(cfg, transport, tokens))
    }
}

impl<T: Transport, P: TokenProvider> AuthorizeHandle<T, P> {
    pub fn with_parts(cfg: ClientConfig, transport: Arc<T>, tokens: Arc<P>) -> Self {
        Self::from_parts(Arc::new(cfg.normalized()), transport, tokens)
    }

    fn from_parts(cfg: Arc<ClientConfig>, transport: Arc<T>, tokens: Arc<P>) -> Self {
        let (router_cache, verify_cache) = if cfg.is_enabled_cache {
            debug!("caches enabled, gc interval {}s", cfg.cache_gc_interval);
            (
                Some(ResponseCache::new(cfg.cache_gc_interval)),
                Some(VerificationCache::new(cfg.cache_gc_interval)),
            )
        } else {
            (None, None)
        };
        Self {
            dispatcher: Dispatcher::new(cfg.clone(), transport),
            cfg,
            tokens,
            router_cache,
            verify_cache,
        }
    }

    pub fn get_config(&self) -> &ClientConfig {
        &self.cfg
    }

    /// Current service token.
    pub async fn get_token(&self) -> Result<String, ErrorResult> {
        self.tokens.get().await
    }

    /// Fetch a new service token, ignoring the cached one.
    pub async fn force_get_token(&self) -> Result<String, ErrorResult> {
        self.tokens.force_get().await.map(|record| record.access_token)
    }

    /// Cache slot of `body` for `router`, `None` when the call must not touch the cache.
    async fn router_cache_slot<B: RequestBody + ?Sized>(&self, router: &str, body: &B) -> Option<CacheSlot> {
        self.router_cache.as_ref()?;
        let reader = body.reader()?;
        let slot = CacheSlot::resolve(router, reader);
        if slot.is_none() {
            get_metrics().await.cache_lookups.with_label_values(&[CACHE_ROUTER, LOOKUP_SKIP]).inc();
        }
        slot
    }

    async fn get_from_router_cache(&self, slot: &CacheSlot) -> Option<Vec<u8>> {
        let cache = self.router_cache.as_ref()?;
        let cached = cache.get(&slot.key).await;
        let result = if cached.is_some() { LOOKUP_HIT } else { LOOKUP_MISS };
        get_metrics().await.cache_lookups.with_label_values(&[CACHE_ROUTER, result]).inc();
        cached
    }

    async fn set_router_cache(&self, slot: &CacheSlot, encoded: serde_json::Result<Vec<u8>>) {
        let Some(cache) = self.router_cache.as_ref() else {
            return;
        };
        match encoded {
            Ok(bytes) => cache.set(&slot.key, bytes, slot.ttl_seconds).await,
            // the call itself succeeded, a cache miss next time is all we lose
            Err(err) => {
                warn!("result for cache key '{}' not cached: {}", slot.key, err);
                get_metrics().await.cache_write_failures.with_label_values(&[CACHE_ROUTER]).inc();
            }
        }
    }

    /// POST `body` as JSON with the service token attached.
    ///
    /// Cacheable bodies are answered from the response cache when possible,
    /// without fetching a token or touching the network.
    pub(crate) async fn token_post<S, B>(&self, router: &str, body: &B) -> Result<S::Output, ErrorResult>
    where
        S: ResultSink,
        B: RequestBody + ?Sized,
    {
        let slot = self.router_cache_slot(router, body).await;

        if let Some(slot) = &slot {
            if let Some(cached) = self.get_from_router_cache(slot).await {
                debug!("{} served from cache, key '{}'", router, slot.key);
                if cached.is_empty() {
                    return Ok(S::empty());
                }
                return S::decode(&cached).map_err(ErrorResult::decode);
            }
        }

        let output = self
            .dispatcher
            .request::<S, _, _>(router, Method::POST, |req| async move {
                let token = self.tokens.get().await?;
                req.header(ACCESS_TOKEN_HEADER, token)
                    .json_body(body)
                    .map_err(ErrorResult::encode)
            })
            .await?;

        if let Some(slot) = &slot {
            self.set_router_cache(slot, S::encode(&output)).await;
        }
        Ok(output)
    }
}
