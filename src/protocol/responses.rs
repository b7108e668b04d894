//! FTP Response handling
//!
//! Defines the reply codes this client expects and the structured form of
//! a server reply line.

/// Standard FTP response codes
pub const DATA_CONNECTION_ALREADY_OPEN: u16 = 125;
pub const FILE_STATUS_OK: u16 = 150;
pub const OK: u16 = 200;
pub const FILE_STATUS: u16 = 213;
pub const READY: u16 = 220;
pub const SERVICE_CLOSING: u16 = 221;
pub const TRANSFER_COMPLETE: u16 = 226;
pub const ENTERING_PASSIVE_MODE: u16 = 227;
pub const LOGIN_SUCCESS: u16 = 230;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const AUTH_FAILED: u16 = 530;

/// One parsed reply line from the control connection.
///
/// For a multi-line reply only the final line is ever returned by
/// `read_final`, so `content` holds the text of that line alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub code: u16,
    pub content: String,
    pub is_final: bool,
}

impl Message {
    pub fn new(code: u16, content: impl Into<String>, is_final: bool) -> Self {
        Self {
            code,
            content: content.into(),
            is_final,
        }
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let separator = if self.is_final { ' ' } else { '-' };
        write!(f, "{}{}{}", self.code, separator, self.content)
    }
}
