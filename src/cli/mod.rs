//! CLI interface for Redfish Tools.
//!
//! Each utility is a subcommand taking a single positional path.

mod commands;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::config::init_logging;

pub use commands::*;
pub use utils::*;

#[derive(Parser, Debug)]
#[command(name = "redfish-tools")]
#[command(about = "Maintenance utilities for the Redfish management service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a legacy service config (server.connectors) to the flattened format in place
    UpgradeConfig {
        /// Path to the JSON configuration file
        config_path: PathBuf,

        /// Print the converted configuration instead of saving it
        #[arg(long)]
        dry_run: bool,

        /// Keep a copy of the original file as <CONFIG_PATH>.backup
        #[arg(long)]
        backup: bool,

        /// Overwrite the file directly instead of through a temporary file
        #[arg(long)]
        no_atomic: bool,
    },

    /// Print ENUM(...) declarations for every EnumType in a Redfish metadata file
    GenerateEnums {
        /// Path to the CSDL metadata XML file
        metadata_path: PathBuf,
    },

    /// Show version information
    Version,
}

impl Cli {
    /// Parse arguments without exiting, so the caller picks the exit code
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Run the CLI command
    pub fn run(self) -> Result<()> {
        let settings = load_settings(self.log_level.clone())?;
        init_logging(&settings.log_level.to_lowercase())?;
        debug!("Resolved settings: {:?}", settings);

        match self.command {
            Commands::UpgradeConfig {
                config_path,
                dry_run,
                backup,
                no_atomic,
            } => {
                let options = migrate_options(&settings, dry_run, backup, no_atomic);
                upgrade_config(config_path, options)
            }

            Commands::GenerateEnums { metadata_path } => generate_enums(metadata_path),

            Commands::Version => version(),
        }
    }
}
