//! Error types
//!
//! Defines the error type shared by every stage of a download session.

use std::fmt;
use std::io;

/// Every way a download session can fail. All of them are terminal.
#[derive(Debug)]
pub enum FtpClientError {
    MalformedUrl(String),
    DnsError(String),
    ConnectError { addr: String, source: io::Error },
    IoError(io::Error),
    InvalidResponse(String),
    UnexpectedCode { actual: u16, expected: Vec<u16> },
    InvalidPasvResponse(String),
    InvalidSizeResponse(String),
    Config(config::ConfigError),
}

impl FtpClientError {
    /// Short name of the operation that failed, used when reporting.
    pub fn operation(&self) -> &'static str {
        match self {
            FtpClientError::MalformedUrl(_) => "parse_url",
            FtpClientError::DnsError(_) => "resolve_host",
            FtpClientError::ConnectError { .. } => "connect",
            FtpClientError::IoError(_) => "io",
            FtpClientError::InvalidResponse(_) => "read_message",
            FtpClientError::UnexpectedCode { .. } => "check_code",
            FtpClientError::InvalidPasvResponse(_) => "parse_pasv_response",
            FtpClientError::InvalidSizeResponse(_) => "parse_size_response",
            FtpClientError::Config(_) => "load_config",
        }
    }
}

impl fmt::Display for FtpClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FtpClientError::MalformedUrl(msg) => write!(f, "Bad URL: {}", msg),
            FtpClientError::DnsError(host) => write!(f, "Could not resolve host {}", host),
            FtpClientError::ConnectError { addr, source } => {
                write!(f, "Failed to connect to {}: {}", addr, source)
            }
            FtpClientError::IoError(e) => write!(f, "I/O error: {}", e),
            FtpClientError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            FtpClientError::UnexpectedCode { actual, expected } => {
                let expected = expected
                    .iter()
                    .map(|code| code.to_string())
                    .collect::<Vec<_>>()
                    .join("/");
                write!(
                    f,
                    "Invalid response (code {}, expected {})",
                    actual, expected
                )
            }
            FtpClientError::InvalidPasvResponse(text) => {
                write!(f, "Invalid \"Passive Mode\" response: {}", text)
            }
            FtpClientError::InvalidSizeResponse(text) => {
                write!(f, "Invalid \"SIZE\" response: {}", text)
            }
            FtpClientError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for FtpClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FtpClientError::ConnectError { source, .. } => Some(source),
            FtpClientError::IoError(e) => Some(e),
            FtpClientError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FtpClientError {
    fn from(error: io::Error) -> Self {
        FtpClientError::IoError(error)
    }
}

impl From<config::ConfigError> for FtpClientError {
    fn from(error: config::ConfigError) -> Self {
        FtpClientError::Config(error)
    }
}

/// Result alias used throughout the crate.
pub type FtpResult<T> = Result<T, FtpClientError>;
