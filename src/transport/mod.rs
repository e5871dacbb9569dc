//! Outbound HTTP plumbing.
//!
//! The dispatcher only talks to the [`Transport`] trait; [`reqwest_transport`]
//! is the production implementation.

use anyhow::Result;
use http::Method;
use serde::Serialize;

pub mod reqwest_transport;

/// One outbound call, assembled by the dispatcher and its request mutator.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// query string on GET, form body on other methods without a json body
    pub params: Vec<(String, String)>,
    pub basic_auth: Option<(String, String)>,
    pub json_body: Option<Vec<u8>>,
}

impl OutboundRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            params: Vec::new(),
            basic_auth: None,
            json_body: None,
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((user.into(), password.into()));
        self
    }

    pub fn json_body<B: Serialize + ?Sized>(mut self, body: &B) -> serde_json::Result<Self> {
        self.json_body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn param_value(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Status code and raw body of a completed call.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Executes a request. An `Err` means no HTTP status was received.
pub trait Transport: Send + Sync + 'static {
    fn execute(
        &self,
        request: OutboundRequest,
    ) -> impl std::future::Future<Output = Result<TransportResponse>> + Send;
}
