//! Liveness endpoint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Ping {
    pub message: &'static str,
}

/// `GET /ping` → `{"message":"ok"}`.
pub async fn ping() -> Json<Ping> {
    Json(Ping { message: "ok" })
}
