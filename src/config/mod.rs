//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + DELEGATE_API_KEY
//!     → loader.rs (parse, apply env override)
//!     → validation.rs (semantic checks)
//!     → DelegateConfig (validated, immutable)
//!     → shared via Arc with the forwarder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - The API key may come from the environment so it stays out of files

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError, API_KEY_ENV};
pub use schema::{DelegateConfig, ListenerConfig, ObservabilityConfig, UpstreamConfig};
pub use validation::{validate_config, ValidationError};
