//! The injected upstream credential.
//!
//! The secret is turned into its `Bearer` header value once at startup and
//! the value is flagged sensitive, so HTTP/2 encoders skip indexing it.
//! It is never formatted: `Debug` and `Display` print a placeholder.

use axum::http::HeaderValue;
use std::fmt;
use thiserror::Error;

/// Why a secret cannot be used as a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCredential {
    #[error("missing api key")]
    Empty,
    #[error("api key contains characters not allowed in a header value")]
    NotHeaderSafe,
}

/// A bearer credential ready to be placed in the `Authorization` slot.
#[derive(Clone)]
pub struct Credential {
    bearer: HeaderValue,
}

impl Credential {
    pub fn new(secret: &str) -> Result<Self, InvalidCredential> {
        if secret.is_empty() {
            return Err(InvalidCredential::Empty);
        }
        let mut bearer = HeaderValue::from_str(&format!("Bearer {secret}"))
            .map_err(|_| InvalidCredential::NotHeaderSafe)?;
        bearer.set_sensitive(true);
        Ok(Self { bearer })
    }

    /// The full `Bearer <secret>` header value.
    pub fn bearer(&self) -> &HeaderValue {
        &self.bearer
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}
