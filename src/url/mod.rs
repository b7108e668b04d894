//! FTP URL handling
//!
//! Decomposes `ftp://[user[:pass]@]host/path` into its components.

pub mod parser;
pub mod results;

pub use parser::{MAX_URL_LENGTH, parse_url, parse_url_with_limit};
pub use results::FtpUrl;
