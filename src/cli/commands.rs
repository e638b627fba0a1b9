//! CLI command implementations.

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::enums::extract_enums;
use crate::migration::persistence::to_pretty_json;
use crate::migration::{self, MigrateOptions, MigrationOutcome};

use super::utils::write_declarations;

/// Upgrade a legacy service config file to the flattened format
pub fn upgrade_config(config_path: PathBuf, options: MigrateOptions) -> Result<()> {
    info!("Checking config format of {}", config_path.display());

    match migration::upgrade_config(&config_path, &options)? {
        MigrationOutcome::AlreadyCurrent => {
            println!("The configuration file is already in the new format.");
        }
        MigrationOutcome::Migrated {
            document,
            written: false,
            ..
        } => {
            print!("{}", to_pretty_json(&document)?);
        }
        MigrationOutcome::Migrated { backup_path, .. } => {
            if let Some(backup) = backup_path {
                println!("Original config saved to {}", backup.display());
            }
            println!(
                "Converted old config to new format and saved to {}",
                config_path.display()
            );
        }
    }

    Ok(())
}

/// Print enum declarations for a metadata file
pub fn generate_enums(metadata_path: PathBuf) -> Result<()> {
    info!("Extracting enums from {}", metadata_path.display());

    let enums = extract_enums(&metadata_path)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_declarations(&enums, &mut out)?;
    out.flush()?;

    Ok(())
}

/// Show version information
pub fn version() -> Result<()> {
    println!("Redfish Tools {}", env!("CARGO_PKG_VERSION"));
    println!("Built with Rust {}", rustc_version::version()?);
    Ok(())
}
