pub mod config;
pub mod error;
pub mod protocol;
pub mod session;
pub mod transfer;
pub mod url;
pub mod utils;

pub use config::ClientConfig;
pub use error::{FtpClientError, FtpResult};
pub use session::TransferEngine;
