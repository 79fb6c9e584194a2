//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and the upstream
//! target. Every problem is reported, not just the first.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::DelegateConfig;
use crate::forwarder::credential::{Credential, InvalidCredential};

/// A single semantic problem with a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    InvalidBindAddress(String),

    #[error("listener.delegate_path `{path}` is invalid: {reason}")]
    InvalidDelegatePath { path: String, reason: String },

    #[error("upstream.url `{url}` is invalid: {reason}")]
    InvalidUpstreamUrl { url: String, reason: String },

    #[error("upstream.api_key: {0}")]
    InvalidApiKey(InvalidCredential),

    #[error("upstream.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("upstream.max_body_size must be greater than zero")]
    ZeroBodyLimit,

    #[error(
        "listener.request_timeout_secs ({request_secs}s) must exceed upstream.timeout_ms ({upstream_ms}ms)"
    )]
    RequestTimeoutTooShort { request_secs: u64, upstream_ms: u64 },
}

/// Validate a configuration. Pure function; returns all errors found.
pub fn validate_config(config: &DelegateConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let listener = &config.listener;
    if listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(listener.bind_address.clone()));
    }
    if let Err(reason) = check_delegate_path(&listener.delegate_path) {
        errors.push(ValidationError::InvalidDelegatePath {
            path: listener.delegate_path.clone(),
            reason,
        });
    }

    let upstream = &config.upstream;
    if let Err(reason) = check_upstream_url(&upstream.url) {
        errors.push(ValidationError::InvalidUpstreamUrl {
            url: upstream.url.clone(),
            reason,
        });
    }
    if let Err(e) = Credential::new(&upstream.api_key) {
        errors.push(ValidationError::InvalidApiKey(e));
    }
    if upstream.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if upstream.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }
    if listener.request_timeout_secs.saturating_mul(1000) <= upstream.timeout_ms {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request_secs: listener.request_timeout_secs,
            upstream_ms: upstream.timeout_ms,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The delegate path is mounted as a literal route, so anything the router
/// would read as a capture or wildcard is refused here instead of at startup.
fn check_delegate_path(path: &str) -> Result<(), String> {
    if !path.starts_with('/') {
        return Err("must start with '/'".to_string());
    }
    if path == "/ping" {
        return Err("collides with /ping".to_string());
    }
    if path.contains(['{', '}']) {
        return Err("must not contain '{' or '}'".to_string());
    }
    if path.split('/').any(|segment| segment.starts_with([':', '*'])) {
        return Err("segments must not start with ':' or '*'".to_string());
    }
    Ok(())
}

fn check_upstream_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme `{}`", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
