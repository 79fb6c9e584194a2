//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! server.rs / forwarder
//!     → logging.rs (structured log events, request ID fields)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → optional Prometheus scrape endpoint
//! ```

pub mod logging;
pub mod metrics;
