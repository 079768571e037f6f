//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the TOML config file.
//! Every field has a default so an empty file is a valid configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Root configuration for the console.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Where the balancer's modification API lives.
    pub server: ServerConfig,

    /// Poll cadence and request deadlines.
    pub polling: PollingConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Location of the modification API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// `http` or `https`.
    pub scheme: String,

    /// Hostname or IP address of the balancer.
    pub host: String,

    /// Port of the modification API (the balancer picks it at startup).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 8081,
        }
    }
}

impl ServerConfig {
    /// `{scheme}://{host}:{port}`, bracketing bare IPv6 hosts.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        Url::parse(&format!("{}://{}:{}", self.scheme, host, self.port))
    }
}

/// Polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Interval between backend list fetches in milliseconds.
    pub interval_ms: u64,

    /// Deadline for any single request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms: Self::DEFAULT_INTERVAL_MS,
            request_timeout_secs: 10,
        }
    }
}

impl PollingConfig {
    /// Poll interval when none is configured.
    pub const DEFAULT_INTERVAL_MS: u64 = 5000;

    /// Interval between fetches.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Per-request deadline handed to the HTTP client.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Expose a Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9191".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let url = ServerConfig::default().base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/");
    }

    #[test]
    fn test_ipv6_host_is_bracketed() {
        let server = ServerConfig {
            host: "::1".into(),
            port: 40000,
            ..ServerConfig::default()
        };
        assert_eq!(server.base_url().unwrap().as_str(), "http://[::1]:40000/");
    }

    #[test]
    fn test_polling_durations() {
        let polling = PollingConfig::default();
        assert_eq!(polling.interval(), Duration::from_millis(5000));
        assert_eq!(polling.request_timeout(), Duration::from_secs(10));
        assert_eq!(polling.interval(), crate::poller::DEFAULT_INTERVAL);
    }
}
