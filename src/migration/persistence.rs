use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::ToolsResult;

const INDENT: &[u8] = b"    ";

/// Render a document with 4-space indentation and a trailing newline
pub fn to_pretty_json(value: &Value) -> ToolsResult<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');

    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

/// Generate backup file path: `config.json` → `config.json.backup`
pub fn backup_path(config_path: &Path) -> PathBuf {
    let mut path = config_path.as_os_str().to_os_string();
    path.push(".backup");
    PathBuf::from(path)
}

/// Copy the current file to its backup path, replacing an older backup
pub fn create_backup(config_path: &Path) -> ToolsResult<PathBuf> {
    let backup = backup_path(config_path);
    std::fs::copy(config_path, &backup)?;
    debug!("Backed up {} to {}", config_path.display(), backup.display());
    Ok(backup)
}

/// Replace the file content through a temporary file in the same directory
///
/// The temporary file is fsynced and then renamed over `path`, so readers see
/// either the old content or the new content, never a truncated file.
/// Permissions of an existing target are carried over. A symlinked `path` is
/// resolved first so the file it points to is replaced, not the link.
pub fn write_atomic(path: &Path, contents: &str) -> ToolsResult<()> {
    let target = match std::fs::canonicalize(path) {
        Ok(resolved) => resolved,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => path.to_path_buf(),
        Err(e) => return Err(e.into()),
    };
    let path = target.as_path();

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents.as_bytes())?;

    if let Ok(metadata) = std::fs::metadata(path) {
        temp_file.as_file().set_permissions(metadata.permissions())?;
    }

    temp_file.as_file().sync_all()?;
    temp_file.persist(path).map_err(|e| e.error)?;

    debug!("Atomically wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

/// Truncate and rewrite the file in place
pub fn write_in_place(path: &Path, contents: &str) -> ToolsResult<()> {
    std::fs::write(path, contents)?;
    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}
