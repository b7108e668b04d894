//! Error handling
//!
//! Defines error types and reporting for the download client.

pub mod handlers;
pub mod types;

pub use handlers::{exit_code, report_error};
pub use types::*;
