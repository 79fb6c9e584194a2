//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! delegation point. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root configuration for the delegation point.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DelegateConfig {
    /// Listener configuration (bind address, delegate route).
    pub listener: ListenerConfig,

    /// The single upstream API and the credential injected into it.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Path of the route that forwards to the upstream.
    pub delegate_path: String,

    /// Overall deadline for one inbound request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            delegate_path: "/delegateRequestToAPI".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Upstream target configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Fixed upstream URL. Never derived from caller input.
    pub url: String,

    /// Secret sent as `Authorization: Bearer <api_key>`.
    /// Can be supplied through `DELEGATE_API_KEY` instead of the file.
    pub api_key: String,

    /// Per-call timeout in milliseconds (connect, response and body).
    pub timeout_ms: u64,

    /// Largest inbound body accepted for forwarding, in bytes.
    pub max_body_size: usize,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "https://api.openai.com/v1/chat/completions".to_string(),
            api_key: String::new(),
            timeout_ms: 10_000,
            max_body_size: 2 * 1024 * 1024, // 2MB
            system_proxy: true,
        }
    }
}

// Hand-written so the secret never reaches a log line through `{:?}`.
impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("url", &self.url)
            .field("api_key", &if self.api_key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("timeout_ms", &self.timeout_ms)
            .field("max_body_size", &self.max_body_size)
            .field("system_proxy", &self.system_proxy)
            .finish()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
