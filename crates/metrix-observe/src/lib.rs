//! Logging setup for metrix binaries.
//!
//! Library crates only emit `tracing` events; this crate decides where they go.
mod config;
pub use config::{LoggerConfig, LoggerFormat, LoggerLevel};

mod error;
pub use error::{LoggerError, LoggerResult};

mod init;
pub use init::init_logger;

mod timer;
