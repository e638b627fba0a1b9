//! Service configuration upgrade from the legacy connector schema.
//!
//! Legacy files keep listener settings in `server.connectors[]` and the
//! interface name as a list:
//!
//! ```json
//! { "server": { "connectors": [ { "port": 8443, "use-ssl": true } ],
//!               "network-interface-name": ["eth0"] } }
//! ```
//!
//! The current schema flattens the first connector into `server` and keeps the
//! interface name as a plain string. Every shape check runs before the document
//! is touched, so a rejected file is never partially rewritten.

pub mod persistence;

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{ResultExt, ToolsError, ToolsResult};

const SERVER_KEY: &str = "server";
const CONNECTORS_KEY: &str = "connectors";
const INTERFACE_NAME_KEY: &str = "network-interface-name";

/// Config schema detected in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `server.connectors` present
    Legacy,
    /// Flattened `server` object (or no `server` at all)
    Current,
}

/// How `upgrade_config` persists a migrated document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrateOptions {
    /// Report the migrated document without touching the file
    pub dry_run: bool,
    /// Copy the original file to `<path>.backup` before overwriting
    pub backup: bool,
    /// Write through a temporary file and rename it over the target
    pub atomic_write: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            backup: false,
            atomic_write: true,
        }
    }
}

/// Result of an upgrade run
#[derive(Debug, Clone, PartialEq)]
pub enum MigrationOutcome {
    /// File already uses the current schema and was left untouched
    AlreadyCurrent,
    Migrated {
        document: Value,
        backup_path: Option<PathBuf>,
        /// False for dry runs
        written: bool,
    },
}

/// Detect the config schema of a parsed document
///
/// # Detection Logic
/// - Missing `server` → Current (nothing to migrate)
/// - `server` object containing `connectors` → Legacy
/// - `server` object without `connectors` → Current
/// - Non-object root or `server` → shape error
pub fn detect_format(document: &Value) -> ToolsResult<ConfigFormat> {
    let root = document.as_object().ok_or_else(|| {
        ToolsError::config_shape(
            format!("top-level value must be an object, found {}", kind(document)),
            None,
        )
    })?;

    match root.get(SERVER_KEY) {
        None => Ok(ConfigFormat::Current),
        Some(Value::Object(server)) if server.contains_key(CONNECTORS_KEY) => Ok(ConfigFormat::Legacy),
        Some(Value::Object(_)) => Ok(ConfigFormat::Current),
        Some(other) => Err(ToolsError::config_shape(
            format!("'{}' must be an object, found {}", SERVER_KEY, kind(other)),
            None,
        )),
    }
}

/// Rewrite a legacy document into the current schema in memory
///
/// Returns `false` when the document is already current. Otherwise:
/// 1. Take `server.connectors[0]`
/// 2. Remove `server.connectors`
/// 3. Replace a `network-interface-name` list with its first entry
/// 4. Merge the connector into `server`, connector values winning
///
/// Key order of `server` is kept: overwritten keys stay in place and new
/// connector keys are appended in the connector's order.
pub fn migrate_document(document: &mut Value) -> ToolsResult<bool> {
    if detect_format(document)? == ConfigFormat::Current {
        return Ok(false);
    }

    let server = document
        .get_mut(SERVER_KEY)
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ToolsError::config_shape("'server' must be an object", None))?;

    let connector = first_connector(server)?;
    let interface_name = flattened_interface_name(server)?;

    server.shift_remove(CONNECTORS_KEY);

    if let Some(name) = interface_name {
        debug!("Flattening {} to '{}'", INTERFACE_NAME_KEY, name);
        server.insert(INTERFACE_NAME_KEY.to_string(), Value::String(name));
    }

    for (key, value) in connector {
        if server.contains_key(&key) {
            debug!("Connector value overrides server.{}", key);
        }
        server.insert(key, value);
    }

    Ok(true)
}

/// Upgrade the config file at `path` to the current schema
///
/// The file is only written when it was in the legacy schema and `dry_run` is
/// off. A missing file is reported before any read.
pub fn upgrade_config(path: &Path, options: &MigrateOptions) -> ToolsResult<MigrationOutcome> {
    if !path.exists() {
        return Err(ToolsError::file_not_found(path));
    }

    let content = std::fs::read_to_string(path)?;
    let mut document: Value = serde_json::from_str(&content)?;

    if !migrate_document(&mut document).with_path_context(path)? {
        info!("{} already uses the current schema", path.display());
        return Ok(MigrationOutcome::AlreadyCurrent);
    }

    if options.dry_run {
        info!("Dry run: {} left untouched", path.display());
        return Ok(MigrationOutcome::Migrated {
            document,
            backup_path: None,
            written: false,
        });
    }

    let rendered = persistence::to_pretty_json(&document)?;

    let backup_path = if options.backup {
        Some(persistence::create_backup(path)?)
    } else {
        None
    };

    if options.atomic_write {
        persistence::write_atomic(path, &rendered)?;
    } else {
        persistence::write_in_place(path, &rendered)?;
    }

    info!("Migrated {} to the current schema", path.display());
    Ok(MigrationOutcome::Migrated {
        document,
        backup_path,
        written: true,
    })
}

fn first_connector(server: &Map<String, Value>) -> ToolsResult<Map<String, Value>> {
    let connectors = match server.get(CONNECTORS_KEY) {
        Some(Value::Array(connectors)) => connectors,
        Some(other) => {
            return Err(ToolsError::config_shape(
                format!("'{}' must be a list, found {}", CONNECTORS_KEY, kind(other)),
                None,
            ))
        }
        None => return Err(ToolsError::config_shape("'connectors' is missing", None)),
    };

    match connectors.first() {
        Some(Value::Object(details)) => {
            if connectors.len() > 1 {
                info!(
                    "Keeping the first of {} connectors, the rest are dropped",
                    connectors.len()
                );
            }
            Ok(details.clone())
        }
        Some(other) => Err(ToolsError::config_shape(
            format!("first connector must be an object, found {}", kind(other)),
            None,
        )),
        None => Err(ToolsError::config_shape(
            format!("'{}' is an empty list", CONNECTORS_KEY),
            None,
        )),
    }
}

/// First entry of a list-valued interface name; `None` when no flattening applies
fn flattened_interface_name(server: &Map<String, Value>) -> ToolsResult<Option<String>> {
    let names = match server.get(INTERFACE_NAME_KEY) {
        Some(Value::Array(names)) => names,
        _ => return Ok(None),
    };

    match names.first() {
        Some(Value::String(name)) => Ok(Some(name.clone())),
        Some(other) => Err(ToolsError::config_shape(
            format!("'{}' entries must be strings, found {}", INTERFACE_NAME_KEY, kind(other)),
            None,
        )),
        None => Err(ToolsError::config_shape(
            format!("'{}' is an empty list", INTERFACE_NAME_KEY),
            None,
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
