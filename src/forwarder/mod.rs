//! Request forwarding to the fixed upstream.
//!
//! # Data Flow
//! ```text
//! inbound Request<Body>
//!     → buffer body (size-limited)
//!     → headers.rs (copy caller headers, then overwrite Authorization)
//!     → reqwest client (fixed URL, bounded timeout)
//!     → status + headers.rs relay rules + fully-read body
//!     → Response<Body> to the caller
//! ```
//!
//! # Design Decisions
//! - Stateless: a `Forwarder` only holds read-only configuration and the
//!   client's connection pool; it is shared via `Arc` across requests
//! - The upstream target never depends on the caller's path, query or host
//! - Nothing is sent to the caller until the upstream body is complete, so a
//!   read failure yields a clean 500 instead of a truncated relay
//! - Dropping the future (caller went away) drops the outbound call and
//!   returns its connection to the pool

pub mod credential;
pub mod error;
pub mod headers;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
};
use reqwest::redirect::Policy;
use std::time::Duration;
use url::Url;

use crate::config::UpstreamConfig;

pub use credential::{Credential, InvalidCredential};
pub use error::{BuildError, ForwardError};
pub use headers::{build_outbound_headers, relay_headers, relay_response_headers};

/// Forwards inbound requests to one upstream with an injected credential.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    upstream_url: Url,
    credential: Credential,
    timeout: Duration,
    max_body_size: usize,
}

impl Forwarder {
    /// Create a forwarder from the upstream section of the configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, BuildError> {
        let upstream_url = Url::parse(&config.url)?;
        let credential = Credential::new(&config.api_key)?;
        let timeout = config.timeout();

        // Redirects are relayed to the caller, not followed.
        let mut builder = reqwest::Client::builder()
            .connect_timeout(timeout)
            .redirect(Policy::none());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            upstream_url,
            credential,
            timeout,
            max_body_size: config.max_body_size,
        })
    }

    pub fn upstream_url(&self) -> &Url {
        &self.upstream_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Forward one inbound request and build the response for the caller.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ForwardError> {
        let (parts, body) = request.into_parts();

        // Consumed exactly once; the stream is dropped on every path.
        let body = to_bytes(body, self.max_body_size)
            .await
            .map_err(|e| ForwardError::RequestConstruction(format!("reading request body: {e}")))?;

        let mut outbound = reqwest::Request::new(parts.method.clone(), self.upstream_url.clone());
        *outbound.headers_mut() = build_outbound_headers(&parts.headers, &self.credential);
        *outbound.body_mut() = Some(reqwest::Body::from(body));
        // Covers connect, response headers and the body read below.
        *outbound.timeout_mut() = Some(self.timeout);

        tracing::debug!(
            method = %outbound.method(),
            upstream = %self.upstream_url,
            "Forwarding request upstream"
        );

        let upstream = self
            .client
            .execute(outbound)
            .await
            .map_err(ForwardError::from_send)?;

        let status = upstream.status();
        let headers = relay_response_headers(&parts.method, status, upstream.headers());
        let body = upstream.bytes().await.map_err(ForwardError::from_body_read)?;

        tracing::debug!(
            status = status.as_u16(),
            body_bytes = body.len(),
            "Upstream response received"
        );

        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

impl std::fmt::Debug for Forwarder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Forwarder")
            .field("upstream_url", &self.upstream_url.as_str())
            .field("credential", &self.credential)
            .field("timeout", &self.timeout)
            .field("max_body_size", &self.max_body_size)
            .finish()
    }
}
