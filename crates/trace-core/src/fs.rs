//! Filesystem helpers for whole-file replacement.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Result, TraceError};

/// Replace `path` with `data` so readers never observe a partial write.
///
/// The bytes go to a sibling temp file which is synced and then renamed over
/// the destination.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| TraceError::Storage(format!("Invalid path: {}", path.display())))?;
    fs::create_dir_all(parent)?;

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| TraceError::Storage(format!("System time error: {}", e)))?
        .as_nanos();
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| TraceError::Storage(format!("Invalid filename: {}", path.display())))?;
    let temp_path = parent.join(format!(".{}.{}.tmp", filename, nanos));

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .map_err(|e| TraceError::Storage(format!("Temp file create failed: {}", e)))?;
    file.write_all(data)
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            TraceError::Storage(format!("Temp file write failed: {}", e))
        })?;

    rename_with_fallback(&temp_path, path)
        .map_err(|e| TraceError::Storage(format!("Atomic rename failed: {}", e)))
}

/// Rename `temp_path` over `destination`, removing the destination first on
/// platforms where rename refuses to overwrite. The temp file is cleaned up
/// if the rename ultimately fails.
pub fn rename_with_fallback(temp_path: &Path, destination: &Path) -> io::Result<()> {
    if let Err(initial_err) = fs::rename(temp_path, destination) {
        let _ = fs::remove_file(destination);
        fs::rename(temp_path, destination).map_err(|retry_err| {
            let _ = fs::remove_file(temp_path);
            io::Error::new(
                retry_err.kind(),
                format!("initial: {}, retry: {}", initial_err, retry_err),
            )
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomic_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("nested").join("value.json");

        write_atomic(&dest, b"[]").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "[]");
    }

    #[test]
    fn test_write_atomic_replaces_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let dest = dir.path().join("value.json");

        write_atomic(&dest, b"old").unwrap();
        write_atomic(&dest, b"new").unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
