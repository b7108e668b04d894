//! Download session
//!
//! Orchestrates the control and data connections for a single file.

pub mod engine;

pub use engine::{TransferEngine, parse_size};
