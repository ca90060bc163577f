//! Transport-level reachability check preceding any protocol-level probe.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::time::timeout;

/// True only if a TCP connection to `addr:port` completes within `wait`.
/// Refusal, timeout, and every other connect failure all read as closed.
pub async fn is_port_open(addr: Ipv4Addr, port: u16, wait: Duration) -> bool {
    let target = SocketAddr::from((addr, port));

    match timeout(wait, TcpStream::connect(target)).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(_)) => false, // Connection refused or other error
        Err(_) => false,     // Timeout
    }
}
