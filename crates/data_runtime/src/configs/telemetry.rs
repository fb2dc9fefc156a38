//! Telemetry configuration loaded from `data/config/telemetry.toml` with
//! environment overrides.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader;

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryCfg {
    pub log_level: Option<String>,
    pub json_logs: Option<bool>,
    /// Prometheus exporter bind address, e.g. `127.0.0.1:9100`.
    pub metrics_addr: Option<String>,
}

impl Default for TelemetryCfg {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            json_logs: Some(false),
            metrics_addr: None,
        }
    }
}

pub fn load_default() -> Result<TelemetryCfg> {
    let mut cfg = match loader::read_data("config/telemetry.toml") {
        Ok(txt) => toml::from_str::<TelemetryCfg>(&txt).context("parse telemetry TOML")?,
        Err(_) => TelemetryCfg::default(),
    };
    if let Ok(lvl) = std::env::var("LOG_LEVEL") {
        cfg.log_level = Some(lvl);
    }
    if let Ok(addr) = std::env::var("METRICS_ADDR") {
        cfg.metrics_addr = Some(addr);
    }
    if let Some(json) = std::env::var("JSON_LOGS").ok().and_then(|v| v.parse().ok()) {
        cfg.json_logs = Some(json);
    }
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet_plaintext() {
        let cfg = TelemetryCfg::default();
        assert_eq!(cfg.log_level.as_deref(), Some("info"));
        assert_eq!(cfg.json_logs, Some(false));
        assert!(cfg.metrics_addr.is_none());
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: TelemetryCfg = toml::from_str("log_level = \"debug\"").expect("parse");
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert!(cfg.metrics_addr.is_none());
    }
}
