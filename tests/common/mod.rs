//! Shared utilities for integration tests: mock upstreams and a running
//! delegation point.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body, Bytes},
    http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode, Uri},
    Router,
};
use delegate_proxy::config::DelegateConfig;
use delegate_proxy::http::HttpServer;
use delegate_proxy::lifecycle::Shutdown;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// The secret the delegation point injects in every test.
pub const REAL_KEY: &str = "sk-real-credential-42";

/// Path the upstream is configured with.
pub const UPSTREAM_PATH: &str = "/v1/chat/completions";

/// A request as the upstream saw it.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

pub type Captured = Arc<Mutex<Vec<CapturedRequest>>>;

/// Start an upstream that records every request and answers with a fixed
/// status and body, plus a few headers a real API would send.
pub async fn start_capture_upstream(status: u16, body: &'static str) -> (SocketAddr, Captured) {
    let captured: Captured = Arc::default();
    let store = captured.clone();

    let app = Router::new().fallback(move |request: Request<Body>| {
        let store = store.clone();
        async move {
            let (parts, incoming) = request.into_parts();
            let bytes = to_bytes(incoming, usize::MAX).await.unwrap();
            store.lock().unwrap().push(CapturedRequest {
                method: parts.method,
                uri: parts.uri,
                headers: parts.headers,
                body: bytes,
            });

            let mut response = Response::new(Body::from(body));
            *response.status_mut() = StatusCode::from_u16(status).unwrap();
            let headers = response.headers_mut();
            headers.insert("content-type", HeaderValue::from_static("application/json"));
            headers.append("set-cookie", HeaderValue::from_static("session=a"));
            headers.append("set-cookie", HeaderValue::from_static("region=b"));
            headers.insert("x-upstream-region", HeaderValue::from_static("eu-1"));
            response
        }
    });

    (serve(app).await, captured)
}

/// Start an upstream that mirrors the request body verbatim and reports
/// what it saw of `x-caller` and `authorization` in response headers.
pub async fn start_echo_upstream() -> SocketAddr {
    let app = Router::new().fallback(|request: Request<Body>| async move {
        let (parts, incoming) = request.into_parts();
        let bytes = to_bytes(incoming, usize::MAX).await.unwrap();

        let mut response = Response::new(Body::from(bytes));
        let headers = response.headers_mut();
        for (seen, name) in [("x-seen-caller", "x-caller"), ("x-seen-authorization", "authorization")] {
            let values: Vec<&str> = parts
                .headers
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .collect();
            headers.insert(seen, HeaderValue::from_str(&values.join(",")).unwrap());
        }
        response
    });

    serve(app).await
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Start a backend that reads the request and never answers.
pub async fn start_stalled_backend() -> SocketAddr {
    start_raw_backend(|mut socket| async move {
        read_request_head(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(60)).await;
    })
    .await
}

/// Fires once per connection when the delegation point closes its end of
/// an upstream socket.
pub type Released = mpsc::UnboundedReceiver<()>;

/// Start a backend that promises 100 bytes, sends 7, then stops writing.
pub async fn start_truncating_backend() -> (SocketAddr, Released) {
    let (released_tx, released) = mpsc::unbounded_channel();
    let addr = start_raw_backend(move |mut socket| {
        let released_tx = released_tx.clone();
        async move {
            read_request_head(&mut socket).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial")
                .await;
            let _ = socket.flush().await;
            tokio::time::sleep(Duration::from_millis(20)).await;
            // Half-close: the peer sees EOF, we can still observe its close.
            let _ = socket.shutdown().await;
            wait_for_peer_close(&mut socket, &released_tx).await;
        }
    })
    .await;
    (addr, released)
}

/// Start a backend that sends headers and part of the body, then stalls
/// until the peer hangs up.
pub async fn start_stalled_body_backend() -> (SocketAddr, Released) {
    let (released_tx, released) = mpsc::unbounded_channel();
    let addr = start_raw_backend(move |mut socket| {
        let released_tx = released_tx.clone();
        async move {
            read_request_head(&mut socket).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\npartial")
                .await;
            let _ = socket.flush().await;
            wait_for_peer_close(&mut socket, &released_tx).await;
        }
    })
    .await;
    (addr, released)
}

/// Read until the peer closes (EOF or reset), then report it.
async fn wait_for_peer_close(socket: &mut TcpStream, released: &mpsc::UnboundedSender<()>) {
    let mut chunk = [0u8; 256];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(_) => continue,
        }
    }
    let _ = released.send(());
}

async fn start_raw_backend<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(TcpStream) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            let handler = handler.clone();
            tokio::spawn(async move { handler(socket).await });
        }
    });
    addr
}

/// Read until the end of the request head (or EOF).
async fn read_request_head(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&chunk[..n]);
                if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    return;
                }
            }
        }
    }
}

/// Default test configuration pointing at `upstream`.
pub fn delegate_config(upstream: SocketAddr) -> DelegateConfig {
    let mut config = DelegateConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.url = format!("http://{upstream}{UPSTREAM_PATH}");
    config.upstream.api_key = REAL_KEY.to_string();
    config.upstream.system_proxy = false;
    config
}

/// A delegation point running on an ephemeral port. Stops when dropped.
pub struct Delegate {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl Delegate {
    pub fn url(&self) -> String {
        format!("http://{}/delegateRequestToAPI", self.addr)
    }

    pub fn ping_url(&self) -> String {
        format!("http://{}/ping", self.addr)
    }
}

impl Drop for Delegate {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

pub async fn start_delegate(config: DelegateConfig) -> Delegate {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    Delegate { addr, shutdown }
}

/// Client that never routes through an environment proxy and never pools,
/// so each request exercises a fresh connection.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
