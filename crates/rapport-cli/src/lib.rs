//! Rapport CLI library.
//!
//! This library provides the core functionality for the Rapport command-line
//! interface: configuration management, boundary validation of relationship
//! snapshots, control simulation, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
