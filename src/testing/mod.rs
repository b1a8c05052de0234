//! # Loopback HTTP fixtures
//!
//! A tiny in-process HTTP/1.1 server that answers every connection with the
//! same canned response. Only compiled for tests.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// What the server sends back for each connection.
#[derive(Debug, Clone)]
pub enum CannedResponse {
    Reply {
        status: u16,
        content_type: &'static str,
        body: String,
    },
    /// Announce `declared_len` body bytes, send `body`, then close.
    Truncated { declared_len: usize, body: String },
    /// Accept the connection, read the request, never answer.
    Silent,
}

impl CannedResponse {
    pub fn json(status: u16, body: &str) -> Self {
        CannedResponse::Reply {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    fn to_bytes(&self) -> Option<Vec<u8>> {
        match self {
            CannedResponse::Reply {
                status,
                content_type,
                body,
            } => Some(raw_response(*status, content_type, body.len(), body)),
            CannedResponse::Truncated { declared_len, body } => {
                Some(raw_response(200, "application/json", *declared_len, body))
            }
            CannedResponse::Silent => None,
        }
    }
}

fn raw_response(status: u16, content_type: &str, content_length: usize, body: &str) -> Vec<u8> {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown");
    let head = format!(
        "HTTP/1.1 {status} {reason}\r\ncontent-type: {content_type}\r\ncontent-length: {content_length}\r\nconnection: close\r\n\r\n"
    );
    let mut raw = head.into_bytes();
    raw.extend_from_slice(body.as_bytes());
    raw
}

pub struct TestServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
}

impl TestServer {
    pub async fn start(response: CannedResponse) -> io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                let response = response.clone();
                tokio::spawn(async move {
                    let _ = answer(stream, &response).await;
                });
            }
        });

        Ok(Self { addr, hits, task })
    }

    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Number of connections accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn answer(mut stream: TcpStream, response: &CannedResponse) -> io::Result<()> {
    read_request_head(&mut stream).await?;

    match response.to_bytes() {
        Some(raw) => {
            stream.write_all(&raw).await?;
            stream.shutdown().await
        }
        None => {
            // Hold the connection open until the client gives up.
            let mut sink = [0u8; 256];
            while stream.read(&mut sink).await? > 0 {}
            Ok(())
        }
    }
}

async fn read_request_head(stream: &mut TcpStream) -> io::Result<()> {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|window| window == b"\r\n\r\n") {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..read]);
    }
    Ok(())
}

/// A URL on loopback with nothing listening behind it.
pub async fn unreachable_url() -> io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}/"))
}
