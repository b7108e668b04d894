//! Transfer module
//!
//! Passive mode negotiation, the data connection copy loop and progress
//! reporting.

pub mod file_ops;
pub mod passive;
pub mod progress;
pub mod results;

pub use file_ops::{copy_data, create_destination, destination_path};
pub use passive::{open_data_channel, parse_pasv_response};
pub use progress::{ConsoleProgress, NoProgress, TransferObserver};
pub use results::{PassiveEndpoint, TransferState, TransferSummary};
