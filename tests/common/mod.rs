#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Fixture directory shared by the integration tests
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("fixtures")
}

pub fn fixture(name: &str) -> Result<String> {
    Ok(std::fs::read_to_string(fixtures_dir().join(name))?)
}

/// Copy a fixture into a fresh temporary directory so tests may mutate it
pub fn scratch_copy(name: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    std::fs::copy(fixtures_dir().join(name), &path)?;
    Ok((dir, path))
}

/// Write inline content into a temporary directory
pub fn scratch_file(name: &str, content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Run the binary with a hermetic environment (no user settings, no RUST_LOG)
pub fn run_tool(args: &[&str]) -> Result<Output> {
    let settings_dir = TempDir::new()?;
    let output = Command::new(env!("CARGO_BIN_EXE_redfish-tools"))
        .args(args)
        .env("REDFISH_TOOLS_CONFIG_PATH", settings_dir.path().join("config.toml"))
        .env_remove("REDFISH_TOOLS_LOG_LEVEL")
        .env_remove("REDFISH_TOOLS_BACKUP")
        .env_remove("REDFISH_TOOLS_ATOMIC_WRITE")
        .env_remove("RUST_LOG")
        .output()?;
    Ok(output)
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
