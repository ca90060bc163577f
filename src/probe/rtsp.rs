//! RTSP surface probing. Tries a vendor's stream URL templates in order and
//! stops at the first one that answers the DESCRIBE handshake.

use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use url::Url;

use super::SuccessfulConnection;

const RTSP_DEFAULT_PORT: u16 = 554;
const USER_AGENT: &str = "RustCameraAudit";

pub struct RtspProber {
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl RtspProber {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            read_timeout,
        }
    }

    /// Evaluate the template sequence lazily, in registry order. The first
    /// stream that answers the handshake wins and later templates are never
    /// attempted. No credentials are tried on RTSP surfaces.
    pub async fn probe_streams(
        &self,
        address: Ipv4Addr,
        templates: &[String],
    ) -> Option<SuccessfulConnection> {
        for template in templates {
            let stream_url = template.replace("{ip}", &address.to_string());
            if self.check_stream(&stream_url).await {
                return Some(SuccessfulConnection {
                    url: stream_url,
                    credential: None,
                });
            }
        }
        None
    }

    /// A failed handshake means "try the next template", never an error.
    async fn check_stream(&self, stream_url: &str) -> bool {
        match self.describe(stream_url).await {
            Ok(established) => established,
            Err(e) => {
                eprintln!("Failed to connect to RTSP stream {stream_url}: {e}");
                false
            }
        }
    }

    /// DESCRIBE handshake: connect, send the request, and read the status
    /// line. The session counts as established iff the server answers 200.
    async fn describe(&self, stream_url: &str) -> io::Result<bool> {
        let parsed = Url::parse(stream_url).map_err(io::Error::other)?;
        let host = parsed
            .host_str()
            .ok_or_else(|| io::Error::other("RTSP URL has no host"))?
            .to_string();
        let port = parsed.port().unwrap_or(RTSP_DEFAULT_PORT);

        let mut stream = timeout(self.connect_timeout, TcpStream::connect((host, port))).await??;

        let request = format!(
            "DESCRIBE {stream_url} RTSP/1.0\r\n\
             CSeq: 1\r\n\
             Accept: application/sdp\r\n\
             User-Agent: {USER_AGENT}\r\n\r\n"
        );
        stream.write_all(request.as_bytes()).await?;

        let mut buffer = [0u8; 512];
        let read = timeout(self.read_timeout, stream.read(&mut buffer)).await??;
        let head = String::from_utf8_lossy(&buffer[..read]);

        let mut status_line = head.lines().next().unwrap_or("").split_whitespace();
        let is_rtsp = status_line
            .next()
            .is_some_and(|version| version.starts_with("RTSP/"));
        Ok(is_rtsp && status_line.next() == Some("200"))
    }
}
