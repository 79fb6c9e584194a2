//! Credential-injecting HTTP delegation point.
//!
//! Receives requests on one local route, forwards them to a single fixed
//! upstream with `Authorization: Bearer <secret>` set server-side, and
//! relays the upstream's status, headers and body back to the caller.

pub mod config;
pub mod forwarder;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::DelegateConfig;
pub use forwarder::{ForwardError, Forwarder};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
