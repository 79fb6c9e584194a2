//! Header propagation rules.
//!
//! Outbound: copy every caller header, then overwrite `Authorization`.
//! Inbound (relay): copy every upstream header except hop-by-hop framing.
//!
//! Multi-valued headers keep all values in their original order in both
//! directions. Framing headers are left out because the HTTP client and
//! server recompute them for the fixed target and the buffered body. The
//! exception is a response that describes a body without carrying one
//! (`HEAD`, `304`): there the upstream's `Content-Length` is the only
//! correct value and is relayed as-is.

use axum::http::{
    header::{AUTHORIZATION, CONTENT_LENGTH},
    HeaderMap, Method, StatusCode,
};

use super::credential::Credential;

/// Headers the outbound client owns for the upstream connection.
const TRANSPORT_OWNED: &[&str] = &["host", "content-length", "transfer-encoding"];

/// Hop-by-hop headers never relayed back to the caller.
const HOP_BY_HOP: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
    "content-length",
];

/// Build outbound headers from the caller's headers.
///
/// Two phases: copy, then overwrite. The credential is inserted last, so
/// any caller-supplied `Authorization` values are replaced, never merged.
pub fn build_outbound_headers(inbound: &HeaderMap, credential: &Credential) -> HeaderMap {
    let mut outbound = copy_except(inbound, TRANSPORT_OWNED);
    outbound.insert(AUTHORIZATION, credential.bearer().clone());
    outbound
}

/// Build the header map relayed to the caller from an upstream response.
pub fn relay_headers(upstream: &HeaderMap) -> HeaderMap {
    copy_except(upstream, HOP_BY_HOP)
}

/// Relay rule for a specific exchange.
///
/// Same as [`relay_headers`], except that the upstream's `Content-Length`
/// survives when the response has no body of its own.
pub fn relay_response_headers(method: &Method, status: StatusCode, upstream: &HeaderMap) -> HeaderMap {
    let mut relayed = relay_headers(upstream);
    if *method == Method::HEAD || status == StatusCode::NOT_MODIFIED {
        for value in upstream.get_all(CONTENT_LENGTH) {
            relayed.append(CONTENT_LENGTH, value.clone());
        }
    }
    relayed
}

fn copy_except(source: &HeaderMap, skip: &[&str]) -> HeaderMap {
    let mut copy = HeaderMap::with_capacity(source.len());
    // `iter` yields one entry per value, in insertion order.
    for (name, value) in source.iter() {
        if skip.contains(&name.as_str()) {
            continue;
        }
        copy.append(name.clone(), value.clone());
    }
    copy
}
