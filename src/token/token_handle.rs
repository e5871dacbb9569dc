use std::sync::Arc;

use http::Method;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::token_context::TokenContext;
use crate::config::settings::ClientConfig;
use crate::error::error_result::ErrorResult;
use crate::model::token::TokenRecord;
use crate::observability::metrics::get_metrics;
use crate::token::TokenProvider;
use crate::transport::{OutboundRequest, Transport};
use crate::utils::constants::ROUTER_TOKEN;

static OK_MSG: &str = "ok";
static ERROR_MSG: &str = "error";

/// Client credentials token provider.
///
/// Keeps the last issued token and fetches a new one once it enters the
/// safety margin. Fetches are serialised so concurrent callers share one.
pub struct TokenHandle<T: Transport> {
    cfg: Arc<ClientConfig>,
    transport: Arc<T>,
    current: RwLock<Option<TokenContext>>,
    refresh: Mutex<()>,
}

impl<T: Transport> TokenHandle<T> {
    pub fn new(cfg: Arc<ClientConfig>, transport: Arc<T>) -> Self {
        Self {
            cfg,
            transport,
            current: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    async fn cached(&self) -> Option<String> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|context| !context.should_update())
            .map(|context| context.record.access_token.clone())
    }

    async fn fetch_and_store(&self) -> Result<TokenRecord, ErrorResult> {
        let metrics = get_metrics().await;
        let record = self.fetch().await.inspect_err(|err| {
            metrics.token_refresh.with_label_values(&[ERROR_MSG]).inc();
            warn!("service token fetch failed: {}", err);
        })?;
        metrics.token_refresh.with_label_values(&[OK_MSG]).inc();
        info!("service token fetched, expires in {}s", record.expires_in);

        let context = TokenContext::new(record.clone(), self.cfg.token_safety_margin_seconds);
        *self.current.write().await = Some(context);
        Ok(record)
    }

    async fn fetch(&self) -> Result<TokenRecord, ErrorResult> {
        let request = OutboundRequest::new(Method::POST, self.cfg.get_url(ROUTER_TOKEN))
            .basic_auth(self.cfg.client_id.as_str(), self.cfg.client_secret.as_str())
            .param("grant_type", "client_credentials");

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|err| ErrorResult::token(err.to_string()))?;

        if response.status != 200 {
            return Err(ErrorResult::token(String::from_utf8_lossy(&response.body))
                .with_status(response.status));
        }

        let record: TokenRecord = serde_json::from_slice(&response.body)
            .map_err(|err| ErrorResult::token(err.to_string()))?;
        if record.access_token.is_empty() {
            return Err(ErrorResult::token("token endpoint returned an empty access_token"));
        }
        Ok(record)
    }
}

impl<T: Transport> TokenProvider for TokenHandle<T> {
    async fn get(&self) -> Result<String, ErrorResult> {
        if let Some(token) = self.cached().await {
            return Ok(token);
        }

        let _refresh = self.refresh.lock().await;
        // another caller may have refreshed while we waited
        if let Some(token) = self.cached().await {
            debug!("service token refreshed by a concurrent caller");
            return Ok(token);
        }
        self.fetch_and_store().await.map(|record| record.access_token)
    }

    async fn force_get(&self) -> Result<TokenRecord, ErrorResult> {
        let _refresh = self.refresh.lock().await;
        self.fetch_and_store().await
    }
}
