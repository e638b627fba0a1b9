//! CLI utility functions.

use anyhow::Result;
use std::io::Write;

use crate::config::Settings;
use crate::enums::{declarations, EnumType};
use crate::migration::MigrateOptions;
use crate::ToolsError;

/// Load tool settings with hierarchy (CLI > env > file > defaults)
pub fn load_settings(log_level: Option<String>) -> Result<Settings> {
    let mut settings = Settings::load()?;

    if let Some(level) = log_level {
        settings.log_level = level;
    }

    settings.validate()?;
    Ok(settings)
}

/// Combine command-line flags with the configured migration defaults
pub fn migrate_options(settings: &Settings, dry_run: bool, backup: bool, no_atomic: bool) -> MigrateOptions {
    MigrateOptions {
        dry_run,
        backup: backup || settings.migrate.backup,
        atomic_write: settings.migrate.atomic_write && !no_atomic,
    }
}

/// Write one declaration line per enum
pub fn write_declarations<W: Write>(enums: &[EnumType], out: &mut W) -> std::io::Result<()> {
    for line in declarations(enums) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Render an error for the terminal, preferring the user-facing message
pub fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ToolsError>() {
        Some(tools_error) => tools_error.user_message(),
        None => format!("Error: {:#}", error),
    }
}
