//! Synthetic protocol servers for exercising the probe executors in tests.
//! Each server binds an ephemeral localhost port and counts the connections
//! and requests it sees, so tests can assert exact probe counts.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

enum Grant {
    /// 200 for every request
    All,
    /// 200 only for this path with exactly this Authorization header
    Exact {
        path: String,
        authorization: Option<String>,
    },
}

/// Minimal HTTP endpoint standing in for a camera's web surface
pub struct TestHttpServer {
    pub port: u16,
    connections: Arc<AtomicUsize>,
    requests: Arc<AtomicUsize>,
}

impl TestHttpServer {
    pub async fn open() -> Self {
        Self::start(Grant::All).await
    }

    /// Grants only `path` presented with the given Basic credentials
    pub async fn protected(path: &str, username: &str, password: &str) -> Self {
        let encoded = BASE64.encode(format!("{username}:{password}"));
        Self::start(Grant::Exact {
            path: path.to_string(),
            authorization: Some(format!("Basic {encoded}")),
        })
        .await
    }

    /// Grants only `path` presented without any Authorization header
    pub async fn unauthenticated(path: &str) -> Self {
        Self::start(Grant::Exact {
            path: path.to_string(),
            authorization: None,
        })
        .await
    }

    async fn start(grant: Grant) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(AtomicUsize::new(0));
        let grant = Arc::new(grant);

        {
            let connections = connections.clone();
            let requests = requests.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    connections.fetch_add(1, Ordering::SeqCst);
                    let grant = grant.clone();
                    let requests = requests.clone();
                    tokio::spawn(serve_http(stream, grant, requests));
                }
            });
        }

        Self {
            port,
            connections,
            requests,
        }
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn serve_http(mut stream: TcpStream, grant: Arc<Grant>, requests: Arc<AtomicUsize>) {
    let Some(head) = read_head(&mut stream).await else {
        return;
    };
    requests.fetch_add(1, Ordering::SeqCst);

    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("")
        .to_string();
    let authorization = head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("authorization")
            .then(|| value.trim().to_string())
    });

    let granted = match grant.as_ref() {
        Grant::All => true,
        Grant::Exact {
            path: want_path,
            authorization: want_auth,
        } => path == *want_path && authorization == *want_auth,
    };

    let response = if granted {
        "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok"
    } else {
        "HTTP/1.1 401 Unauthorized\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
    };
    let _ = stream.write_all(response.as_bytes()).await;
}

/// Minimal RTSP endpoint that answers DESCRIBE with 200 or 404
pub struct TestRtspServer {
    pub port: u16,
    connections: Arc<AtomicUsize>,
}

impl TestRtspServer {
    pub async fn start(accept: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let connections = Arc::new(AtomicUsize::new(0));

        {
            let connections = connections.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = listener.accept().await else {
                        break;
                    };
                    connections.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(serve_rtsp(stream, accept));
                }
            });
        }

        Self { port, connections }
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

async fn serve_rtsp(mut stream: TcpStream, accept: bool) {
    if read_head(&mut stream).await.is_none() {
        return;
    }
    let response = if accept {
        "RTSP/1.0 200 OK\r\nCSeq: 1\r\nContent-Length: 0\r\n\r\n"
    } else {
        "RTSP/1.0 404 Stream Not Found\r\nCSeq: 1\r\n\r\n"
    };
    let _ = stream.write_all(response.as_bytes()).await;
}

/// A localhost port that was just released, so connecting to it is refused
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn read_head(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        data.extend_from_slice(&chunk[..read]);
        if data.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
        if data.len() > 16 * 1024 {
            break;
        }
    }

    if data.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&data).into_owned())
    }
}
