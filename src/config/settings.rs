use serde::Deserialize;

use crate::utils::constants::{
    DEFAULT_CACHE_GC_INTERVAL_SECS, DEFAULT_HTTP_TIMEOUT_MS, DEFAULT_TOKEN_SAFETY_MARGIN_SECS,
    ROUTER_PLACEHOLDER,
};

/// ================================
/// Client configuration
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// e.g. `https://auth.example.com` or `https://gw.example.com/asapi{router}`
    pub base_url: String,
    #[serde(default)]
    pub service_identify: String,
    pub client_id: String,
    pub client_secret: String,
    /// master switch for both response and verification caches
    #[serde(default)]
    pub is_enabled_cache: bool,
    /// sweep interval of the caches, also the margin subtracted from
    /// verification ttl. 0 means default (300)
    #[serde(default)]
    pub cache_gc_interval: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_token_safety_margin_seconds")]
    pub token_safety_margin_seconds: u64,
    pub logging: Option<LoggingConfig>,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        service_identify: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            service_identify: service_identify.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            is_enabled_cache: false,
            cache_gc_interval: 0,
            timeout_ms: DEFAULT_HTTP_TIMEOUT_MS,
            token_safety_margin_seconds: DEFAULT_TOKEN_SAFETY_MARGIN_SECS,
            logging: None,
        }
    }

    pub fn with_cache(mut self, cache_gc_interval: u64) -> Self {
        self.is_enabled_cache = true;
        self.cache_gc_interval = cache_gc_interval;
        self
    }

    /// Apply defaults that depend on other fields.
    pub fn normalized(mut self) -> Self {
        if self.cache_gc_interval == 0 {
            self.cache_gc_interval = DEFAULT_CACHE_GC_INTERVAL_SECS;
        }
        self
    }

    /// Resolve the full url of an endpoint (`router` always starts with `/`).
    pub fn get_url(&self, router: &str) -> String {
        if self.base_url.contains(ROUTER_PLACEHOLDER) {
            return self.base_url.replace(ROUTER_PLACEHOLDER, router);
        }
        format!("{}{}", self.base_url.trim_end_matches('/'), router)
    }
}

fn default_timeout_ms() -> u64 {
    DEFAULT_HTTP_TIMEOUT_MS
}

fn default_token_safety_margin_seconds() -> u64 {
    DEFAULT_TOKEN_SAFETY_MARGIN_SECS
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Compact,
}
