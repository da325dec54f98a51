//! Configuration directory helpers for the Axigen connector
//!
//! Provides utilities for loading and saving JSON files under the shared
//! config directory (~/.config/axigen/). Set `AXIGEN_CONFIG_DIR` to point
//! the connector at a different directory.
//!
//! Call [`init`] at application startup to bootstrap the config directory.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "AXIGEN_CONFIG_DIR";

/// Name of the directory under the platform config dir
const APP_DIR: &str = "axigen";

/// Subdirectory holding trigger state files
const STATE_DIR: &str = "state";

/// Initialize the config directory.
///
/// Creates ~/.config/axigen/ if it doesn't exist.
/// Call this once at application startup.
pub fn init() -> Result<PathBuf> {
    ensure_config_dir()
}

/// Get the config directory (`$AXIGEN_CONFIG_DIR` or ~/.config/axigen/)
pub fn config_dir() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::config_dir().map(|p| p.join(APP_DIR)),
    }
}

/// Get the path to a config file within the config directory
pub fn config_path(filename: &str) -> Option<PathBuf> {
    config_dir().map(|p| p.join(filename))
}

/// Get the directory where polling state is kept
pub fn state_dir() -> Option<PathBuf> {
    config_dir().map(|p| p.join(STATE_DIR))
}

/// Load and parse a JSON config file from the config directory
pub fn load_json<T: DeserializeOwned>(filename: &str) -> Result<T> {
    let path = config_path(filename).context("Could not determine config directory")?;
    load_json_file(&path)
}

/// Load and parse a JSON file from an arbitrary path
pub fn load_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Check if a config file exists in the config directory
pub fn config_exists(filename: &str) -> bool {
    config_path(filename).is_some_and(|p| p.exists())
}

/// Ensure the config directory exists
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir().context("Could not determine config directory")?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;
    Ok(dir)
}

/// Save a value as JSON to a config file in the config directory
pub fn save_json<T: serde::Serialize>(filename: &str, value: &T) -> Result<()> {
    let dir = ensure_config_dir()?;
    save_json_file(&dir.join(filename), value)
}

/// Save a value as pretty JSON to an arbitrary path, creating parent directories
pub fn save_json_file<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(value)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_is_inside_config_dir() {
        let (Some(dir), Some(path)) = (config_dir(), config_path("test.json")) else {
            return;
        };
        assert_eq!(path, dir.join("test.json"));
    }

    #[test]
    fn test_state_dir_is_nested() {
        if let (Some(dir), Some(state)) = (config_dir(), state_dir()) {
            assert_eq!(state, dir.join("state"));
        }
    }

    #[test]
    fn test_save_and_load_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("value.json");

        save_json_file(&path, &serde_json::json!({ "answer": 42 })).unwrap();
        let loaded: serde_json::Value = load_json_file(&path).unwrap();
        assert_eq!(loaded["answer"], 42);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does-not-exist.json");
        let result: Result<serde_json::Value> = load_json_file(&path);
        assert!(result.is_err());
    }
}
