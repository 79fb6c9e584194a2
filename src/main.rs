//! Credential-injecting delegation point.
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────┐
//!     ─────────────────────▶│ axum server (request id, trace, timeout) │
//!                           │        │                                 │
//!                           │        ▼                                 │
//!                           │   forwarder: copy headers,               │
//!                           │   overwrite Authorization ───────────────┼──▶ Upstream API
//!     Client Response       │        │                                 │
//!     ◀─────────────────────│   relay status, headers, body ◀──────────┼─── (fixed URL)
//!                           └──────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use delegate_proxy::config::load_config;
use delegate_proxy::observability::{logging, metrics};
use delegate_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "delegate-proxy")]
#[command(about = "Forwards requests to a fixed upstream with a server-side credential", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "delegate.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %args.config.display(),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        timeout_ms = config.upstream.timeout_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    server.run(listener, shutdown.subscribe()).await?;

    // The server stopped on Ctrl+C; release anything else still subscribed.
    let waiting = shutdown.trigger();
    tracing::info!(waiting, "Shutdown complete");
    Ok(())
}
