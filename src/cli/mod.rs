//! CLI module for geopost
//!
//! Provides command-line interface for:
//! - init: create the data directory, empty stores, and static directory
//! - start: ensure stores exist and boot the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, start, Config};
pub use errors::{CliError, CliResult};
