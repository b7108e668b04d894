//! Transfer result types
//!
//! Defines structures produced while negotiating and running a download.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Where the server listens for the passive data connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveEndpoint {
    pub address: Ipv4Addr,
    pub port: u16,
}

impl PassiveEndpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.address, self.port))
    }
}

/// Byte counts and timing of the data loop
#[derive(Debug, Clone)]
pub struct TransferState {
    pub bytes_transferred: u64,
    pub total_bytes: u64,
    pub start_time: Instant,
    pub end_time: Option<Instant>,
}

impl TransferState {
    pub fn start(total_bytes: u64) -> Self {
        Self {
            bytes_transferred: 0,
            total_bytes,
            start_time: Instant::now(),
            end_time: None,
        }
    }

    pub fn record(&mut self, chunk_len: usize) {
        self.bytes_transferred += chunk_len as u64;
    }

    pub fn finish(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Time spent in the data loop, up to now if it has not finished.
    pub fn elapsed(&self) -> Duration {
        self.end_time
            .unwrap_or_else(Instant::now)
            .duration_since(self.start_time)
    }
}

/// Outcome of a completed session
#[derive(Debug, Clone)]
pub struct TransferSummary {
    pub destination: PathBuf,
    pub bytes_transferred: u64,
    pub total_bytes: u64,
    pub elapsed: Duration,
}
