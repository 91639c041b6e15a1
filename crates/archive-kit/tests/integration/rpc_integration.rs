//! The explorer over real HTTP: one request per node, no retries.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use archive_kit::*;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const BALANCE_OK: &str = r#"{"jsonrpc":"2.0","id":1,"result":"0x5"}"#;
const PRUNED_BODY: &str = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"missing trie node abc123 (path ) <nil>"}}"#;

/// A node answering every request with a fixed status line and body.
struct CannedNode {
    url: String,
    hits: Arc<AtomicUsize>,
}

impl CannedNode {
    async fn start(status: &'static str, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                if !read_request(&mut stream).await {
                    continue;
                }
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });

        Self { url, hits }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Read one request, headers and body. Returns false if the peer hung up.
async fn read_request(stream: &mut TcpStream) -> bool {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let mut expected = None;

    loop {
        if let Some(total) = expected {
            if buf.len() >= total {
                return true;
            }
        }
        let n = match stream.read(&mut chunk).await {
            Ok(0) | Err(_) => return false,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if expected.is_none() {
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
                let body_len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                expected = Some(end + 4 + body_len);
            }
        }
    }
}

fn explorer(full: &CannedNode, archive: &CannedNode, reporter: Arc<MemoryReporter>) -> Explorer {
    Explorer::builder(full.url.as_str(), archive.url.as_str())
        .reporter(reporter)
        .build()
        .unwrap()
}

fn holder() -> Address {
    "0x28c6c06298d514db089934071355e5743bf21d60".parse().unwrap()
}

#[tokio::test]
async fn test_unavailable_full_node_is_asked_once() {
    let full = CannedNode::start("503 Service Unavailable", "busy").await;
    let archive = CannedNode::start("200 OK", BALANCE_OK).await;
    let reporter = Arc::new(MemoryReporter::new());
    let explorer = explorer(&full, &archive, reporter.clone());

    let started = Instant::now();
    let err = explorer
        .eth_balance(&holder(), &BlockReference::Number(12_000_000))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Rpc(RpcError::Network {
            status_code: Some(503),
            ..
        })
    ));
    assert_eq!(full.hits(), 1);
    assert_eq!(archive.hits(), 0);
    assert_eq!(reporter.lines(), vec![INVALID_QUERY]);
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn test_pruned_error_with_http_status_falls_back() {
    let full = CannedNode::start("500 Internal Server Error", PRUNED_BODY).await;
    let archive = CannedNode::start("200 OK", BALANCE_OK).await;
    let reporter = Arc::new(MemoryReporter::new());
    let explorer = explorer(&full, &archive, reporter.clone());

    let balance = explorer
        .eth_balance(&holder(), &BlockReference::Number(12_000_000))
        .await
        .unwrap();

    assert_eq!(balance, "0x5");
    assert_eq!(full.hits(), 1);
    assert_eq!(archive.hits(), 1);
    assert_eq!(reporter.lines().len(), 1);
}
