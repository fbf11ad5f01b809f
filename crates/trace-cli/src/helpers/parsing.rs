//! Argument parsing helpers.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::errors::CliError;

/// Parse a `YYYY-MM-DD` calendar date and return it in canonical form.
pub fn parse_date(value: &str) -> anyhow::Result<String> {
    let trimmed = value.trim();
    let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        CliError::invalid_input(format!(
            "Invalid date '{}'. Use YYYY-MM-DD (e.g., 2024-03-01).",
            trimmed
        ))
    })?;
    Ok(parsed.format("%Y-%m-%d").to_string())
}

/// Where an export lands.
///
/// `None` means stdout. A directory gets `default_name` appended; no
/// output at all writes `default_name` into `cwd`.
pub fn resolve_export_path(
    output: Option<&str>,
    cwd: &Path,
    default_name: &str,
) -> Option<PathBuf> {
    match output {
        Some("-") => None,
        Some(value) => {
            let path = PathBuf::from(value);
            if path.is_dir() {
                Some(path.join(default_name))
            } else {
                Some(path)
            }
        }
        None => Some(cwd.join(default_name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_canonical() {
        assert_eq!(parse_date("2024-03-01").unwrap(), "2024-03-01");
        assert_eq!(parse_date(" 2024-3-1 ").unwrap(), "2024-03-01");
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let err = parse_date("yesterday").unwrap_err();
        let cli = err.downcast_ref::<CliError>().unwrap();
        assert!(cli.to_string().contains("YYYY-MM-DD"));
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_resolve_export_path() {
        let dir = tempfile::tempdir().unwrap();
        let name = "trace-entries-2024-03-01.json";

        assert_eq!(resolve_export_path(Some("-"), dir.path(), name), None);
        assert_eq!(
            resolve_export_path(None, dir.path(), name),
            Some(dir.path().join(name))
        );
        let as_dir = dir.path().to_string_lossy().to_string();
        assert_eq!(
            resolve_export_path(Some(&as_dir), Path::new("/unused"), name),
            Some(dir.path().join(name))
        );
        assert_eq!(
            resolve_export_path(Some("out.json"), dir.path(), name),
            Some(PathBuf::from("out.json"))
        );
    }
}
