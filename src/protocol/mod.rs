//! FTP Protocol implementation
//!
//! Client side of the control connection: command rendering, reply
//! parsing and reply-code validation.

pub mod channel;
pub mod commands;
pub mod parser;
pub mod reader;
pub mod responses;

pub use channel::{ControlChannel, check_code};
pub use commands::Command;
pub use parser::parse_reply_line;
pub use reader::ResponseReader;
pub use responses::Message;
