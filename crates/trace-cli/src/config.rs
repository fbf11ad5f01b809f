//! TOML configuration and XDG path defaults.
//!
//! Every field has a default, so a missing config file is the same as an
//! empty one.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trace_core::editor::DEFAULT_DEBOUNCE_MS;
use trace_core::storage::BackendKind;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub storage: StorageSection,
    pub remote: RemoteSection,
    pub editor: EditorSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    pub backend: BackendKind,
    pub local_store: LocalStoreKind,
    pub data_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSection {
    /// Database shared by the hosted auth and data services
    pub database: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSection {
    pub debounce_ms: i64,
    pub command: Option<String>,
}

impl Default for EditorSection {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            command: None,
        }
    }
}

/// Where the local key-value store keeps its values.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LocalStoreKind {
    /// One JSON file per key
    #[default]
    File,
    /// A single SQLite database
    Sqlite,
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn read_config(path: &Path) -> anyhow::Result<TraceConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("trace"));
        }
    }
    Ok(home_dir()?.join(".config").join("trace"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("trace"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("trace"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: TraceConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.backend, BackendKind::Local);
        assert_eq!(config.storage.local_store, LocalStoreKind::File);
        assert_eq!(config.editor.debounce_ms, DEFAULT_DEBOUNCE_MS);
        assert!(config.remote.database.is_none());
    }

    #[test]
    fn test_read_config_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\nbackend = \"remote\"\nlocal_store = \"sqlite\"\n\n[editor]\ndebounce_ms = 250\ncommand = \"nano\"\n",
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.storage.backend, BackendKind::Remote);
        assert_eq!(config.storage.local_store, LocalStoreKind::Sqlite);
        assert_eq!(config.editor.debounce_ms, 250);
        assert_eq!(config.editor.command.as_deref(), Some("nano"));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nbackend = \"cloud\"\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
