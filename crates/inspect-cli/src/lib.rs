//! Inspect CLI library.
//!
//! Configuration loading, logging setup, service wiring and output
//! formatting for the `inspect` command-line tool.

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod telemetry;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::{InspectConfig, LogFormat};
pub use error::{CliError, Result};
pub use output::Formatter;
