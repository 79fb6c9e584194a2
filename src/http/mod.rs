//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned / kept)
//!     → delegate route → forwarder (upstream call, relay)
//!     → Send to client
//!
//! GET /ping → ping.rs (static liveness payload)
//! ```

pub mod ping;
pub mod request;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
