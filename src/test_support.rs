//! Bare TCP servers for tests that need slow or unresponsive origins.
//!
//! mockito answers immediately, which hides ordering and timeout behavior.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A canned `200 OK` answer sent after `delay`.
#[derive(Debug, Clone)]
pub struct Route {
    pub delay: Duration,
    pub body: String,
}

impl Route {
    pub fn new(delay: Duration, body: impl Into<String>) -> Self {
        Self {
            delay,
            body: body.into(),
        }
    }
}

/// Accepts connections and never writes a byte. Returns the base URL.
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
    format!("http://{addr}")
}

/// Serves `routes` keyed by request path; unknown paths get a 404.
/// Returns the base URL.
pub async fn delayed_server(routes: HashMap<String, Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let routes = Arc::clone(&routes);
            tokio::spawn(async move {
                let _ = respond(stream, &routes).await;
            });
        }
    });
    format!("http://{addr}")
}

async fn respond(mut stream: TcpStream, routes: &HashMap<String, Route>) -> std::io::Result<()> {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    let path = String::from_utf8_lossy(&request)
        .split_whitespace()
        .nth(1)
        .unwrap_or("/")
        .to_string();

    let response = match routes.get(&path) {
        Some(route) => {
            tokio::time::sleep(route.delay).await;
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                route.body.len(),
                route.body
            )
        }
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string(),
    };

    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}
