//! Shared utilities for integration testing.
//!
//! Backends are raw TCP listeners on ephemeral ports so each test can see
//! exactly what crossed the wire.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pinproxy::observability::DispatchStats;
use pinproxy::{GatewayConfig, HttpServer, Shutdown};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A running gateway bound to an ephemeral port.
#[allow(dead_code)]
pub struct TestGateway {
    pub addr: SocketAddr,
    pub stats: Arc<DispatchStats>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<std::io::Result<()>>,
}

#[allow(dead_code)]
impl TestGateway {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a gateway for `config`, ignoring its bind address.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let stats = server.stats();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    TestGateway {
        addr,
        stats,
        shutdown,
        handle,
    }
}

/// Gateway config pinned to a plain-HTTP upstream at `upstream`.
#[allow(dead_code)]
pub fn http_upstream_config(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.upstream.scheme = "http".into();
    config.upstream.address = upstream.to_string();
    config.timeouts.probe_secs = 1;
    config.timeouts.relay_secs = 5;
    config
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Client that never routes through an environment proxy.
#[allow(dead_code)]
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Start a backend that records each request it receives (head plus body,
/// as text) and answers with `status` and `body`.
///
/// Connections that close without sending anything (reachability probes)
/// are not recorded.
#[allow(dead_code)]
pub async fn start_recording_backend(
    status: u16,
    body: &'static str,
) -> (SocketAddr, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let tx = tx.clone();
            tokio::spawn(async move {
                let Some(request) = read_request(&mut socket).await else {
                    return;
                };
                let _ = tx.send(request);

                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nX-Backend: mock\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (addr, rx)
}

/// Start a backend that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Start a backend that answers every request with bytes that are not HTTP.
#[allow(dead_code)]
pub async fn start_garbage_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                if read_request(&mut socket).await.is_none() {
                    return;
                }
                let _ = socket.write_all(b"this is not http\r\n\r\n").await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Send raw bytes to `addr` and return whatever comes back before the
/// peer closes or a short read timeout elapses.
#[allow(dead_code)]
pub async fn raw_exchange(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut buf = vec![0u8; 4096];
    let n = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .unwrap()
        .unwrap();
    String::from_utf8_lossy(&buf[..n]).into_owned()
}

/// Read one request head plus its `Content-Length` body.
async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let head_end = loop {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = find_head_end(&data) {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = socket.read(&mut buf).await.ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
    }

    Some(String::from_utf8_lossy(&data).into_owned())
}

fn find_head_end(data: &[u8]) -> Option<usize> {
    data.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Header lines of a recorded request, lowercased, as `name: value`.
#[allow(dead_code)]
pub fn header_lines(request: &str) -> Vec<String> {
    request
        .split("\r\n\r\n")
        .next()
        .unwrap_or_default()
        .lines()
        .skip(1)
        .map(|line| line.to_ascii_lowercase())
        .collect()
}

/// Values of header `name` in a recorded request, in order.
#[allow(dead_code)]
pub fn header_values(request: &str, name: &str) -> Vec<String> {
    let prefix = format!("{}:", name.to_ascii_lowercase());
    header_lines(request)
        .into_iter()
        .filter_map(|line| line.strip_prefix(&prefix).map(|v| v.trim().to_string()))
        .collect()
}
