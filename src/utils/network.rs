//! Network utilities
//!
//! Host resolution, connection establishment and optional timeouts.

use log::{debug, info};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpStream, lookup_host};

use crate::error::{FtpClientError, FtpResult};

/// Await `operation`, failing with `TimedOut` if `limit` elapses first.
/// With no limit the operation may block indefinitely.
pub async fn with_timeout<F, T>(limit: Option<Duration>, operation: F) -> io::Result<T>
where
    F: Future<Output = io::Result<T>>,
{
    match limit {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "operation timed out"))?,
        None => operation.await,
    }
}

/// Resolve a host name to a socket address, preferring IPv4.
pub async fn resolve_host(host: &str, port: u16) -> FtpResult<SocketAddr> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|e| FtpClientError::DnsError(format!("{}: {}", host, e)))?
        .collect();
    debug!("Resolved {} to {:?}", host, addrs);

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| FtpClientError::DnsError(host.to_string()))
}

/// Open a TCP connection to `addr`.
pub async fn connect(addr: SocketAddr, limit: Option<Duration>) -> FtpResult<TcpStream> {
    let stream = with_timeout(limit, TcpStream::connect(addr))
        .await
        .map_err(|source| FtpClientError::ConnectError {
            addr: addr.to_string(),
            source,
        })?;
    info!("Connected to {}", addr);
    Ok(stream)
}
