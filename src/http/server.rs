//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the delegate route and `/ping`
//! - Wire up middleware (request ID, tracing, overall timeout)
//! - Bind server to listener and shut down gracefully
//! - Hand delegate requests to the forwarder and map its failures

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::DelegateConfig;
use crate::forwarder::{BuildError, Forwarder};
use crate::http::ping::ping;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::lifecycle::signalled;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<Forwarder>,
}

/// HTTP server for the delegation point.
pub struct HttpServer {
    router: Router,
    config: DelegateConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: DelegateConfig) -> Result<Self, BuildError> {
        let forwarder = Arc::new(Forwarder::new(&config.upstream)?);

        tracing::info!(
            upstream = %forwarder.upstream_url(),
            timeout_ms = config.upstream.timeout_ms,
            "Forwarder ready"
        );

        let router = Self::build_router(&config, AppState { forwarder });
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DelegateConfig, state: AppState) -> Router {
        Router::new()
            .route(&config.listener.delegate_path, any(delegate_handler))
            .route("/ping", get(ping))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for serving or in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until Ctrl+C or a shutdown broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            delegate_path = %self.config.listener.delegate_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(signalled(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &DelegateConfig {
        &self.config
    }
}

/// Delegate handler: forwards the request and relays the outcome.
async fn delegate_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().to_string();

    tracing::debug!(request_id = %request_id, method = %method, "Delegating request");

    match state.forwarder.forward(request).await {
        Ok(response) => {
            let status = response.status().as_u16();
            tracing::info!(
                request_id = %request_id,
                method = %method,
                status,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Request delegated"
            );
            metrics::record_request(&method, status, start_time);
            response
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                error_kind = e.kind(),
                error = %e,
                elapsed_ms = start_time.elapsed().as_millis() as u64,
                "Delegation failed"
            );
            metrics::record_error(e.kind());
            metrics::record_request(&method, e.status_code().as_u16(), start_time);
            e.into_response()
        }
    }
}
