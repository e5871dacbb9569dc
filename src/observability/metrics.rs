use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub const CACHE_ROUTER: &str = "router";
pub const CACHE_VERIFY: &str = "verify";

pub const LOOKUP_HIT: &str = "hit";
pub const LOOKUP_MISS: &str = "miss";
pub const LOOKUP_SKIP: &str = "skip";

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ABORTED: &str = "aborted";
pub const OUTCOME_TRANSPORT_ERROR: &str = "transport_error";
pub const OUTCOME_REMOTE_ERROR: &str = "remote_error";
pub const OUTCOME_DECODE_ERROR: &str = "decode_error";

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE.get_or_init(|| async {
        info!("Initializing Metrics ...");
        Metrics::new()}
    ).await
}

/// Text exposition of every registered metric.
pub async fn render() -> Result<String, prometheus::Error> {
    let metrics = get_metrics().await;
    TextEncoder::new().encode_to_string(&metrics.registry.gather())
}


#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Dispatch metrics
    pub requests: IntCounterVec,
    pub request_duration: HistogramVec,

    // Cache metrics
    pub cache_lookups: IntCounterVec,
    pub cache_write_failures: IntCounterVec,

    // Token metrics
    pub token_refresh: IntCounterVec,

    // Config
    pub config_parse_failures: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("asapi".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            requests: IntCounterVec::new(Opts::new("requests_total", "Outbound calls by endpoint and outcome"),&["router", "method", "outcome"],).unwrap(),
            request_duration: HistogramVec::new(HistogramOpts::new("request_duration_seconds", "Outbound call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]),&["router"],).unwrap(),

            cache_lookups: IntCounterVec::new(Opts::new("cache_lookups_total", "Cache lookups by cache and result"),&["cache", "result"],).unwrap(),
            cache_write_failures: IntCounterVec::new(Opts::new("cache_write_failures_total", "Results that could not be encoded for the cache"),&["cache"],).unwrap(),

            token_refresh: IntCounterVec::new(Opts::new("token_refresh_total", "Service token fetches by outcome"),&["outcome"],).unwrap(),

            config_parse_failures: IntCounter::new("config_parse_failures_total","Config parse failures",).unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.requests.clone())).unwrap();
        reg.register(Box::new(metrics.request_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cache_lookups.clone())).unwrap();
        reg.register(Box::new(metrics.cache_write_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_refresh.clone())).unwrap();
        reg.register(Box::new(metrics.config_parse_failures.clone())).unwrap();

        metrics
    }
}
