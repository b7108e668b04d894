//! URL result types
//!
//! Defines the structure produced by URL parsing.

use std::fmt;
use std::path::Path;

use crate::error::{FtpClientError, FtpResult};

/// Credentials used when the URL carries none.
pub const ANONYMOUS: &str = "anonymous";

/// Components of a parsed `ftp://` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpUrl {
    pub username: String,
    pub password: String,
    /// Host exactly as written, including any `:port` suffix
    pub host: String,
    /// Everything after the first `/` following the host
    pub path: String,
}

impl FtpUrl {
    /// Split `host` into the name to resolve and the control port.
    ///
    /// Accepts `name`, `name:port` and `[v6addr]:port`. Without a port
    /// suffix `default_port` is used.
    pub fn endpoint(&self, default_port: u16) -> FtpResult<(String, u16)> {
        if let Some(rest) = self.host.strip_prefix('[') {
            let (name, tail) = rest.split_once(']').ok_or_else(|| {
                FtpClientError::MalformedUrl(format!("Unterminated IPv6 host {}", self.host))
            })?;
            let port = if tail.is_empty() {
                default_port
            } else {
                match tail.strip_prefix(':') {
                    Some(port) => parse_port(port)?,
                    None => {
                        return Err(FtpClientError::MalformedUrl(format!(
                            "Unexpected text after host {}",
                            self.host
                        )));
                    }
                }
            };
            return Ok((name.to_string(), port));
        }

        match self.host.split_once(':') {
            Some((name, port)) if !name.is_empty() => Ok((name.to_string(), parse_port(port)?)),
            Some(_) => Err(FtpClientError::MalformedUrl(format!(
                "Missing host name in {}",
                self.host
            ))),
            None => Ok((self.host.clone(), default_port)),
        }
    }

    /// Final segment of the remote path, used as the local file name
    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.path).file_name().and_then(|name| name.to_str())
    }

    /// Whether the URL carried no credentials of its own
    pub fn is_anonymous(&self) -> bool {
        self.username == ANONYMOUS
    }
}

/// Password-free rendering, safe for logs.
impl fmt::Display for FtpUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ftp://{}@{}/{}", self.username, self.host, self.path)
    }
}

fn parse_port(port: &str) -> FtpResult<u16> {
    match port.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(FtpClientError::MalformedUrl(format!("Invalid port {}", port))),
    }
}
