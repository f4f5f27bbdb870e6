//! Proprel CLI library.
//!
//! Command-line access to the property relationship engine: corpus checks,
//! validation, and recommendations against local corpus files, with text or
//! JSON output.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
