//! URL parser
//!
//! Splits an `ftp://` URL into credentials, host and remote path. No
//! percent-decoding is performed; query and fragment text stay in the path.

use log::debug;

use crate::error::{FtpClientError, FtpResult};
use crate::url::results::{ANONYMOUS, FtpUrl};

/// Maximum length of a URL accepted by `parse_url`
pub const MAX_URL_LENGTH: usize = 2048;

const SCHEME: &str = "ftp";

/// Parse a URL using the default length limit.
pub fn parse_url(url: &str) -> FtpResult<FtpUrl> {
    parse_url_with_limit(url, MAX_URL_LENGTH)
}

/// Parse a URL, rejecting anything longer than `max_length` bytes.
pub fn parse_url_with_limit(url: &str, max_length: usize) -> FtpResult<FtpUrl> {
    if url.len() > max_length {
        return Err(FtpClientError::MalformedUrl(
            "URL max length exceeded".into(),
        ));
    }

    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| FtpClientError::MalformedUrl(format!("Missing scheme in {}", url)))?;

    if scheme != SCHEME {
        return Err(FtpClientError::MalformedUrl(format!(
            "Invalid scheme {}",
            scheme
        )));
    }

    // Only the last `@` ahead of the first `/` delimits credentials
    let first_slash = rest.find('/').unwrap_or(rest.len());
    let (credentials, location) = match rest[..first_slash].rfind('@') {
        Some(at) => (Some(&rest[..at]), &rest[at + 1..]),
        None => (None, rest),
    };

    let (host, path) = location
        .split_once('/')
        .ok_or_else(|| FtpClientError::MalformedUrl(format!("Missing path in {}", url)))?;

    if host.is_empty() || path.is_empty() {
        return Err(FtpClientError::MalformedUrl(format!(
            "Missing host or path in {}",
            url
        )));
    }

    let (username, password) = match credentials {
        None => (ANONYMOUS, ANONYMOUS),
        Some(credentials) => credentials
            .split_once(':')
            .unwrap_or((credentials, ANONYMOUS)),
    };

    let parsed = FtpUrl {
        username: username.to_string(),
        password: password.to_string(),
        host: host.to_string(),
        path: path.to_string(),
    };
    debug!("Parsed URL {}", parsed);
    Ok(parsed)
}
