//! Lifecycle management subsystem.
//!
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Build forwarder → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C or trigger → Stop accepting → Drain in-flight requests → Exit
//! ```

pub mod shutdown;

pub use shutdown::{signalled, Shutdown};
