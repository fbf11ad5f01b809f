//! Directory-backed key-value store: one `<key>.json` file per key.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TraceError};
use crate::fs::write_atomic;

use super::KeyValueStore;

const MAX_KEY_BYTES: usize = 64;

/// Stores each key as a file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.len() > MAX_KEY_BYTES {
            return Err(TraceError::InvalidInput(format!(
                "Key must be 1-{} bytes",
                MAX_KEY_BYTES
            )));
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(TraceError::InvalidInput(format!(
                "Key contains invalid characters: {}",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TraceError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                err
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        debug!(key, bytes = value.len(), "writing key");
        write_atomic(&path, value.as_bytes())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_key_reads_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("trace_entries").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        FileStore::new(dir.path())
            .set("trace_theme", "dark")
            .unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(reopened.get("trace_theme").unwrap().as_deref(), Some("dark"));
        assert!(dir.path().join("trace_theme.json").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(TraceError::InvalidInput(_))
        ));
        assert!(store.get("").is_err());
    }
}
