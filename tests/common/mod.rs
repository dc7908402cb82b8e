//! Shared utilities for integration tests: stub upstreams and a running proxy.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::Response;
use axum::Router;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use oauth_proxy::config::ProxyConfig;
use oauth_proxy::http::HttpServer;
use oauth_proxy::lifecycle::Shutdown;

/// What a stub upstream saw for one call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Fixed answer a stub upstream gives to every call.
#[derive(Debug, Clone)]
pub struct StubReply {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: Bytes,
}

impl StubReply {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

/// A running stub upstream that records every request it receives.
pub struct StubUpstream {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl StubUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn stub_handler(State(state): State<StubState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    state.calls.lock().unwrap().push(RecordedCall {
        method: parts.method,
        path: parts.uri.path().to_string(),
        headers: parts.headers,
        body,
    });

    let mut response = Response::new(Body::from(state.reply.body.clone()));
    *response.status_mut() = state.reply.status;
    for &(name, value) in &state.reply.headers {
        response
            .headers_mut()
            .append(name, HeaderValue::from_static(value));
    }
    response
}

/// Start a stub upstream on an ephemeral loopback port.
pub async fn start_stub(reply: StubReply) -> StubUpstream {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        calls: calls.clone(),
    };
    let app = Router::new().fallback(stub_handler).with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubUpstream { addr, calls }
}

/// Start an upstream that reads one request head, waits `delay`, then answers.
///
/// The receiver yields whether the caller still held the connection open when
/// the delay ran out.
pub async fn start_slow_stub(delay: Duration) -> (SocketAddr, oneshot::Receiver<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => {
                    let _ = tx.send(false);
                    return;
                }
                Ok(n) => head.extend_from_slice(&buf[..n]),
            }
        }

        tokio::time::sleep(delay).await;

        // A closed peer reads as EOF; a waiting one has nothing to send.
        let alive = match tokio::time::timeout(Duration::from_millis(50), socket.read(&mut buf)).await {
            Err(_) => true,
            Ok(Ok(0)) | Ok(Err(_)) => false,
            Ok(Ok(_)) => true,
        };

        let body = r#"{"sub":"late"}"#;
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
        let _ = tx.send(alive);
    });

    (addr, rx)
}

/// An address nothing is listening on.
pub async fn refused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Proxy configuration pointing at the given upstream URLs.
pub fn proxy_config(token_url: String, user_info_url: String) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.token_url = token_url;
    config.upstream.user_info_url = user_info_url;
    config.upstream.use_system_proxy = false;
    config.upstream.timeout_secs = 10;
    config
}

/// A running proxy. Dropping it stops the server.
pub struct RunningProxy {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

impl RunningProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

pub async fn start_proxy(config: ProxyConfig) -> RunningProxy {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    RunningProxy {
        addr,
        _shutdown: shutdown,
    }
}

/// Test client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
