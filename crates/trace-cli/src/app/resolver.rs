//! Path resolution for config and data files.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::{default_config_path, xdg_data_dir, TraceConfig};

/// Config file to read, if any.
///
/// An explicit path must exist; the default location is optional.
pub fn resolve_config_path(cli: &Cli) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = cli.config.as_deref().filter(|p| !p.trim().is_empty()) {
        let path = PathBuf::from(path);
        if !path.exists() {
            return Err(anyhow::anyhow!(
                "Config not found at {}\nHint: Remove --config (or TRACE_CONFIG) to use defaults.",
                path.display()
            ));
        }
        return Ok(Some(path));
    }
    let default_path = default_config_path()?;
    Ok(default_path.exists().then_some(default_path))
}

/// Directory of the local store: flag, then config, then XDG data home.
pub fn resolve_data_dir(cli: &Cli, config: &TraceConfig) -> anyhow::Result<PathBuf> {
    if let Some(dir) = cli.data_dir.as_deref().filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(dir) = config
        .storage
        .data_dir
        .as_deref()
        .filter(|d| !d.trim().is_empty())
    {
        return Ok(PathBuf::from(dir));
    }
    xdg_data_dir()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_data_dir_flag_wins_over_config() {
        let cli = Cli::try_parse_from(["trace", "--data-dir", "/tmp/flag", "list"]).unwrap();
        let mut config = TraceConfig::default();
        config.storage.data_dir = Some("/tmp/config".into());
        assert_eq!(
            resolve_data_dir(&cli, &config).unwrap(),
            PathBuf::from("/tmp/flag")
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let cli =
            Cli::try_parse_from(["trace", "--config", "/nonexistent/trace.toml", "list"]).unwrap();
        let err = resolve_config_path(&cli).unwrap_err();
        assert!(err.to_string().contains("Config not found"));
    }
}
