//! Forwarding failures and their caller-visible form.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::error::Error as StdError;
use thiserror::Error;

use super::credential::InvalidCredential;

/// A failed forward. Every variant is request-scoped and becomes a 500.
///
/// Messages carry the underlying error text only; the credential is never
/// part of any value that reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForwardError {
    /// The inbound request could not be turned into an outbound one.
    #[error("Failed to create request: {0}")]
    RequestConstruction(String),

    /// Network failure or timeout reaching the upstream.
    #[error("Request failed: {0}")]
    UpstreamUnreachable(String),

    /// The upstream body could not be fully read.
    #[error("Failed to read response: {0}")]
    ResponseRead(String),
}

impl ForwardError {
    /// Stable label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::RequestConstruction(_) => "request_construction",
            ForwardError::UpstreamUnreachable(_) => "upstream_unreachable",
            ForwardError::ResponseRead(_) => "response_read",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// Classify a client error raised while sending or awaiting headers.
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ForwardError::RequestConstruction(describe(err))
        } else {
            ForwardError::UpstreamUnreachable(describe(err))
        }
    }

    /// Classify a client error raised while reading the upstream body.
    /// Hitting the deadline mid-body counts as the upstream being unreachable.
    pub(crate) fn from_body_read(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ForwardError::UpstreamUnreachable(describe(err))
        } else {
            ForwardError::ResponseRead(describe(err))
        }
    }
}

impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Render an error and its sources as `outer: inner: root`, without the URL.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Failure to build a [`Forwarder`](super::Forwarder) at startup.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid upstream url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] InvalidCredential),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),
}
