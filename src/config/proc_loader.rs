use std::path::Path;

use anyhow::{bail, Result};
use regex::Regex;
use tracing::{debug, error};

use crate::config::settings::{ClientConfig, LoggingConfig};
use crate::observability::metrics::get_metrics;

/// Load and validate config from YAML file
pub async fn file_to_config(path: &Path) -> Result<ClientConfig> {
    let content = tokio::fs::read_to_string(path).await?;

    let expanded = expand_env_vars(&content)?;
    parse_config(expanded).await
}

pub async fn parse_config(content: String) -> Result<ClientConfig> {
    let metrics = get_metrics().await;
    let mut client_config: ClientConfig = serde_yaml::from_str(&content).inspect_err(|e| {
        error!("parse config error: {}", e);
        metrics.config_parse_failures.inc();
    })?;

    // Apply defaults
    if client_config.logging.is_none() {
        client_config.logging = Some(LoggingConfig::default());
    }
    client_config = client_config.normalized();

    debug!("validation config ...");
    validate_client_config(&client_config)?;

    Ok(client_config)
}

fn validate_client_config(cfg: &ClientConfig) -> Result<()> {
    if cfg.base_url.trim().is_empty() {
        bail!("base_url must not be empty");
    }
    if !cfg.base_url.starts_with("http://") && !cfg.base_url.starts_with("https://") {
        bail!("base_url '{}' must start with http:// or https://", cfg.base_url);
    }
    if cfg.client_id.trim().is_empty() {
        bail!("client_id must not be empty");
    }
    if cfg.timeout_ms == 0 {
        bail!("timeout_ms must be greater than 0");
    }
    Ok(())
}

fn expand_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{(\w+)(?::([^\}]+))?\}")?;
    let expanded = re.replace_all(input, |caps: &regex::Captures| {
        let var = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        std::env::var(var).unwrap_or_else(|_| default.to_string())
    });
    Ok(expanded.to_string())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::settings::LogFormat;
    use crate::utils::constants::DEFAULT_CACHE_GC_INTERVAL_SECS;
    use serial_test::serial;
    use std::io::Write;

    const MINIMAL: &str = r#"
base_url: "http://auth.local"
service_identify: "SVC"
client_id: "client"
client_secret: "secret"
"#;

    #[tokio::test]
    async fn defaults_are_applied() {
        let cfg = parse_config(MINIMAL.to_owned()).await.unwrap();
        assert!(!cfg.is_enabled_cache);
        assert_eq!(cfg.cache_gc_interval, DEFAULT_CACHE_GC_INTERVAL_SECS);
        assert_eq!(cfg.timeout_ms, 5000);
        assert_eq!(cfg.token_safety_margin_seconds, 60);
        let logging = cfg.logging.unwrap();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, LogFormat::Compact);
    }

    #[tokio::test]
    async fn invalid_base_url_is_rejected() {
        let content = MINIMAL.replace("http://auth.local", "auth.local");
        let err = parse_config(content).await.unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[tokio::test]
    async fn malformed_yaml_is_rejected() {
        assert!(parse_config("base_url: [".to_owned()).await.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn env_vars_are_expanded_from_file() {
        std::env::set_var("ASAPI_TEST_SECRET", "from-env");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
base_url: "${{ASAPI_TEST_BASE:http://fallback.local}}"
client_id: "client"
client_secret: "${{ASAPI_TEST_SECRET}}"
is_enabled_cache: true
cache_gc_interval: 120
logging:
  level: debug
  format: json
"#
        )
        .unwrap();

        let cfg = file_to_config(file.path()).await.unwrap();
        std::env::remove_var("ASAPI_TEST_SECRET");

        assert_eq!(cfg.base_url, "http://fallback.local");
        assert_eq!(cfg.client_secret, "from-env");
        assert!(cfg.is_enabled_cache);
        assert_eq!(cfg.cache_gc_interval, 120);
        assert_eq!(cfg.logging.unwrap().format, LogFormat::Json);
    }
}
