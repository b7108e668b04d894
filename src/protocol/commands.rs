//! Module `commands`
//!
//! Defines the FTP commands this client sends and how each one is
//! rendered on the wire.

use std::fmt;
use std::io;

use crate::error::{FtpClientError, FtpResult};

/// Represents an FTP command sent to the server.
///
/// Commands that carry an argument store it as a `String`.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    USER(String), // Username for login
    PASS(String), // Password for login
    TYPE(String), // Representation type, `I` for binary
    SIZE(String), // Query remote file size
    PASV,         // Enter passive mode
    RETR(String), // Retrieve/download file
    QUIT,
}

impl Command {
    /// Binary transfer type, the only one this client uses.
    pub fn binary() -> Self {
        Command::TYPE("I".to_string())
    }

    /// The command verb as sent on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Command::USER(_) => "USER",
            Command::PASS(_) => "PASS",
            Command::TYPE(_) => "TYPE",
            Command::SIZE(_) => "SIZE",
            Command::PASV => "PASV",
            Command::RETR(_) => "RETR",
            Command::QUIT => "QUIT",
        }
    }

    pub fn argument(&self) -> Option<&str> {
        match self {
            Command::USER(arg)
            | Command::PASS(arg)
            | Command::TYPE(arg)
            | Command::SIZE(arg)
            | Command::RETR(arg) => Some(arg),
            Command::PASV | Command::QUIT => None,
        }
    }

    /// Rendering safe for logs; the password never appears.
    pub fn loggable(&self) -> String {
        match self {
            Command::PASS(_) => "PASS ****".to_string(),
            other => other.to_string(),
        }
    }

    /// The full command line including the CR LF terminator.
    ///
    /// Arguments containing a line break would smuggle a second command
    /// onto the control connection and are rejected.
    pub fn to_wire(&self) -> FtpResult<String> {
        if let Some(arg) = self.argument() {
            if arg.contains(['\r', '\n']) {
                return Err(FtpClientError::IoError(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} argument contains a line break", self.name()),
                )));
            }
        }
        Ok(format!("{}\r\n", self))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.argument() {
            Some(arg) => write!(f, "{} {}", self.name(), arg),
            None => f.write_str(self.name()),
        }
    }
}
