// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;

use crate::authorize::handle::AuthorizeHandle;
use crate::config::settings::ClientConfig;
use crate::error::error_result::ErrorResult;
use crate::model::token::TokenRecord;
use crate::request::reader::{RequestBody, RequestReader};
use crate::token::TokenProvider;
use crate::transport::{OutboundRequest, Transport, TransportResponse};

pub const KEYED_ROUTER: &str = "/api/test/keyed";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn test_config(cache: bool) -> ClientConfig {
    let cfg = ClientConfig::new("http://auth.local", "SVC", "client", "secret");
    if cache {
        cfg.with_cache(300).normalized()
    } else {
        cfg.normalized()
    }
}

pub fn ok_json(value: serde_json::Value) -> anyhow::Result<TransportResponse> {
    Ok(TransportResponse::new(200, value.to_string()))
}

type Reply = Box<dyn Fn(&OutboundRequest) -> anyhow::Result<TransportResponse> + Send + Sync>;

/// Transport double: answers from a closure and records every call.
pub struct RecordingTransport {
    reply: Reply,
    delay: Duration,
    calls: AtomicUsize,
    requests: Mutex<Vec<OutboundRequest>>,
}

impl RecordingTransport {
    pub fn replying<F>(reply: F) -> Self
    where
        F: Fn(&OutboundRequest) -> anyhow::Result<TransportResponse> + Send + Sync + 'static,
    {
        Self {
            reply: Box::new(reply),
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for RecordingTransport {
    async fn execute(&self, request: OutboundRequest) -> anyhow::Result<TransportResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let reply = (self.reply)(&request);
        self.requests.lock().unwrap().push(request);
        reply
    }
}

/// Token provider double with a fixed answer.
pub struct ScriptedTokens {
    result: Result<String, ErrorResult>,
    calls: AtomicUsize,
}

impl ScriptedTokens {
    pub fn ok(token: &str) -> Self {
        Self { result: Ok(token.to_owned()), calls: AtomicUsize::new(0) }
    }

    pub fn failing(err: ErrorResult) -> Self {
        Self { result: Err(err), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenProvider for ScriptedTokens {
    async fn get(&self) -> Result<String, ErrorResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    async fn force_get(&self) -> Result<TokenRecord, ErrorResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map(|access_token| TokenRecord {
            access_token,
            expires_in: 3600,
            ..Default::default()
        })
    }
}

pub fn handle_with(
    cache: bool,
    transport: Arc<RecordingTransport>,
    tokens: Arc<ScriptedTokens>,
) -> AuthorizeHandle<RecordingTransport, ScriptedTokens> {
    AuthorizeHandle::with_parts(test_config(cache), transport, tokens)
}

/// Cacheable body with a configurable ttl for [`KEYED_ROUTER`].
#[derive(Debug, Clone, Serialize)]
pub struct KeyedBody {
    pub id: String,
    #[serde(skip)]
    pub ttl: i64,
}

impl KeyedBody {
    pub fn new(id: &str, ttl: i64) -> Self {
        Self { id: id.to_owned(), ttl }
    }
}

impl RequestReader for KeyedBody {
    fn expires(&self, router: &str) -> i64 {
        if router == KEYED_ROUTER { self.ttl } else { 0 }
    }

    fn hash(&self) -> String {
        self.id.clone()
    }
}

impl RequestBody for KeyedBody {
    fn reader(&self) -> Option<&dyn RequestReader> {
        Some(self)
    }
}
