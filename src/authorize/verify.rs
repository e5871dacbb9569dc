//! Token verification. Both variants bypass the response cache and keep
//! their results in the verification cache, keyed by the token itself.

use std::future::ready;

use http::Method;
use tracing::debug;

use crate::authorize::handle::AuthorizeHandle;
use crate::dispatch::sink::Json;
use crate::error::error_result::ErrorResult;
use crate::model::identity::{VerifiedIdentity, VerifyTokenInfo, VerifyTokenResponse};
use crate::observability::metrics::{get_metrics, CACHE_VERIFY, LOOKUP_HIT, LOOKUP_MISS};
use crate::token::TokenProvider;
use crate::transport::Transport;
use crate::utils::constants::{ROUTER_VERIFY, ROUTER_VERIFY_V2};

impl<T: Transport, P: TokenProvider> AuthorizeHandle<T, P> {
    /// Resolve `token` to `(user_id, client_id)`.
    pub async fn verify_token(&self, token: &str) -> Result<(String, String), ErrorResult> {
        if let Some(VerifiedIdentity::Subject { user_id, client_id }) = self.lookup_verification(token).await {
            return Ok((user_id, client_id));
        }

        let res = self.verify_request::<VerifyTokenResponse>(ROUTER_VERIFY, token).await?;
        let identity = VerifiedIdentity::Subject {
            user_id: res.user_id.clone(),
            client_id: res.client_id.clone(),
        };
        self.remember_verification(token, identity, res.expires_in).await;
        Ok((res.user_id, res.client_id))
    }

    /// Resolve `token` to the extended identity record.
    pub async fn verify_token_v2(&self, token: &str) -> Result<VerifyTokenInfo, ErrorResult> {
        if let Some(VerifiedIdentity::Detailed(info)) = self.lookup_verification(token).await {
            return Ok(info);
        }

        let info = self.verify_request::<VerifyTokenInfo>(ROUTER_VERIFY_V2, token).await?;
        self.remember_verification(token, VerifiedIdentity::Detailed(info.clone()), info.expires_in)
            .await;
        Ok(info)
    }

    async fn verify_request<R>(&self, router: &str, token: &str) -> Result<R, ErrorResult>
    where
        R: serde::de::DeserializeOwned + serde::Serialize + Default + Send,
    {
        let service = self.cfg.service_identify.as_str();
        self.dispatcher
            .request::<Json<R>, _, _>(router, Method::GET, |req| {
                ready(Ok(req.param("access_token", token).param("service", service)))
            })
            .await
    }

    async fn lookup_verification(&self, token: &str) -> Option<VerifiedIdentity> {
        let cache = self.verify_cache.as_ref()?;
        let cached = cache.get(token).await;
        let result = if cached.is_some() { LOOKUP_HIT } else { LOOKUP_MISS };
        get_metrics().await.cache_lookups.with_label_values(&[CACHE_VERIFY, result]).inc();
        cached
    }

    async fn remember_verification(&self, token: &str, identity: VerifiedIdentity, expires_in: i64) {
        let Some(cache) = self.verify_cache.as_ref() else {
            return;
        };
        if !cache.remember(token, identity, expires_in).await {
            debug!("verification not cached, token expires in {}s", expires_in);
        }
    }
}
