use std::time::Duration;

use anyhow::Result;
use http::header::CONTENT_TYPE;
use http::Method;
use reqwest::Client;
use tracing::trace;

use crate::transport::{OutboundRequest, Transport, TransportResponse};

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<TransportResponse> {
        let OutboundRequest { method, url, headers, params, basic_auth, json_body } = request;
        trace!("{} {}", method, url);

        let mut builder = self.client.request(method.clone(), &url);

        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }
        if let Some((user, password)) = &basic_auth {
            builder = builder.basic_auth(user, Some(password));
        }

        builder = match json_body {
            Some(body) => {
                if !params.is_empty() {
                    builder = builder.query(&params);
                }
                builder.header(CONTENT_TYPE, "application/json").body(body)
            }
            None if method == Method::GET || method == Method::DELETE => builder.query(&params),
            None if !params.is_empty() => builder.form(&params),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}
