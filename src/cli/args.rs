//! CLI argument definitions using clap
//!
//! Commands:
//! - geopost init --config <path>
//! - geopost start --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geopost - a minimal ingestion and reporting API for geotagged event reports
#[derive(Parser, Debug)]
#[command(name = "geopost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data directory, empty stores, and static asset directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./geopost.json")]
        config: PathBuf,
    },

    /// Start the geopost server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./geopost.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
