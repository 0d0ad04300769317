//! queuectl CLI library
//!
//! Command handlers, configuration, and output formatting, exported so the
//! binary and the tests share one implementation.

#![forbid(unsafe_code)]

pub mod commands;
pub mod config;
pub mod utils;

pub use config::QueuectlConfig;
pub use utils::formatting::{CommandOutput, OutputFormat, Table};
