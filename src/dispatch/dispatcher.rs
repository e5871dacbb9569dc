use std::future::Future;
use std::sync::Arc;

use http::Method;
use tracing::debug;

use crate::config::settings::ClientConfig;
use crate::dispatch::sink::ResultSink;
use crate::error::error_result::ErrorResult;
use crate::helpers::time::get_instant;
use crate::observability::metrics::{
    get_metrics, OUTCOME_ABORTED, OUTCOME_DECODE_ERROR, OUTCOME_OK, OUTCOME_REMOTE_ERROR,
    OUTCOME_TRANSPORT_ERROR,
};
use crate::transport::{OutboundRequest, Transport};

/// Builds, sends and classifies one call against the authorization service.
pub struct Dispatcher<T: Transport> {
    cfg: Arc<ClientConfig>,
    transport: Arc<T>,
}

impl<T: Transport> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self { cfg: self.cfg.clone(), transport: self.transport.clone() }
    }
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(cfg: Arc<ClientConfig>, transport: Arc<T>) -> Self {
        Self { cfg, transport }
    }

    /// Send a request to `router`.
    ///
    /// `prepare` attaches headers, params or a body to the bare request; an
    /// error from it aborts the call before any network I/O. A 200 answer is
    /// decoded through `S`, any other status becomes a remote error carrying
    /// the raw body.
    pub async fn request<S, F, Fut>(&self, router: &str, method: Method, prepare: F) -> Result<S::Output, ErrorResult>
    where
        S: ResultSink,
        F: FnOnce(OutboundRequest) -> Fut,
        Fut: Future<Output = Result<OutboundRequest, ErrorResult>>,
    {
        let metrics = get_metrics().await;
        let method_label = method.to_string();
        let count = |outcome: &str| {
            metrics.requests.with_label_values(&[router, method_label.as_str(), outcome]).inc();
        };

        let request = prepare(OutboundRequest::new(method.clone(), self.cfg.get_url(router)))
            .await
            .inspect_err(|_| count(OUTCOME_ABORTED))?;

        let start = get_instant();
        let response = self.transport.execute(request).await;
        metrics.request_duration.with_label_values(&[router]).observe(start.elapsed().as_secs_f64());

        let response = response.map_err(|err| {
            count(OUTCOME_TRANSPORT_ERROR);
            debug!("{} {} transport error: {}", method, router, err);
            ErrorResult::transport(err)
        })?;

        match response.status {
            200 => S::decode(&response.body)
                .map_err(|err| {
                    count(OUTCOME_DECODE_ERROR);
                    ErrorResult::decode(err)
                })
                .inspect(|_| count(OUTCOME_OK)),
            status => {
                count(OUTCOME_REMOTE_ERROR);
                debug!("{} {} answered {}", method, router, status);
                Err(ErrorResult::remote(&response.body, status))
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dispatch::sink::{Discard, Json};
    use crate::error::error_result::ErrorKind;
    use crate::model::user::UserVersion;
    use crate::tests::common::{test_config, RecordingTransport};
    use crate::transport::TransportResponse;
    use std::future::ready;

    fn dispatcher(transport: Arc<RecordingTransport>) -> Dispatcher<RecordingTransport> {
        Dispatcher::new(Arc::new(test_config(false)), transport)
    }

    #[tokio::test]
    async fn success_is_decoded_into_sink() {
        let transport = Arc::new(RecordingTransport::replying(|_| {
            Ok(TransportResponse::new(200, r#"{"ClearAuth":1,"Version":3,"Activate":0}"#))
        }));
        let version = dispatcher(transport.clone())
            .request::<Json<UserVersion>, _, _>("/api/x", Method::POST, |req| ready(Ok(req.param("a", "b"))))
            .await
            .unwrap();

        assert_eq!(version, UserVersion { clear_auth: 1, version: 3, activate: 0 });
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, "http://auth.local/api/x");
        assert_eq!(sent.param_value("a"), Some("b"));
    }

    #[tokio::test]
    async fn non_200_carries_raw_body_and_status() {
        let transport = Arc::new(RecordingTransport::replying(|_| {
            Ok(TransportResponse::new(503, "service unavailable"))
        }));
        let err = dispatcher(transport)
            .request::<Json<UserVersion>, _, _>("/api/x", Method::POST, |req| ready(Ok(req)))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Remote);
        assert_eq!(err.message, "service unavailable");
        assert_eq!(err.status_code, Some(503));
    }

    #[tokio::test]
    async fn transport_failure_has_no_status() {
        let transport = Arc::new(RecordingTransport::replying(|_| Err(anyhow::anyhow!("dns failure"))));
        let err = dispatcher(transport)
            .request::<Discard, _, _>("/api/x", Method::GET, |req| ready(Ok(req)))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Transport);
        assert_eq!(err.message, "dns failure");
        assert_eq!(err.status_code, None);
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let transport = Arc::new(RecordingTransport::replying(|_| Ok(TransportResponse::new(200, "<html>"))));
        let err = dispatcher(transport)
            .request::<Json<UserVersion>, _, _>("/api/x", Method::POST, |req| ready(Ok(req)))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Decode);
        assert_eq!(err.status_code, None);
    }

    #[tokio::test]
    async fn discard_sink_skips_decoding() {
        let transport = Arc::new(RecordingTransport::replying(|_| Ok(TransportResponse::new(200, "<html>"))));
        let result = dispatcher(transport)
            .request::<Discard, _, _>("/api/x", Method::POST, |req| ready(Ok(req)))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn failing_mutator_aborts_before_network() {
        let transport = Arc::new(RecordingTransport::replying(|_| Ok(TransportResponse::new(200, "{}"))));
        let err = dispatcher(transport.clone())
            .request::<Discard, _, _>("/api/x", Method::POST, |_| ready(Err(ErrorResult::encode("bad body"))))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Encode);
        assert_eq!(transport.calls(), 0);
    }
}
