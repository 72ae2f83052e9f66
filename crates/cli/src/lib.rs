//! Bookmarket CLI Library
//!
//! Argument parsing, configuration resolution, command handlers and output
//! rendering for the `bookmarket` binary.

pub mod args;
pub mod commands;
pub mod config;
pub mod console;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
