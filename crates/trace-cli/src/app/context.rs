//! Application context for the Trace CLI.
//!
//! Provides a unified context that combines CLI arguments with the lazily
//! loaded config file and key-value store.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::debug;

use trace_core::kv::{FileStore, SqliteStore};
use trace_core::storage::BackendKind;
use trace_core::theme::ThemeMode;
use trace_core::KeyValueStore;

use crate::cli::Cli;
use crate::config::{read_config, LocalStoreKind, TraceConfig};
use crate::ui::UiContext;

use super::resolver::{resolve_config_path, resolve_data_dir};

const SQLITE_STORE_FILE: &str = "trace.db";
const REMOTE_DATABASE_FILE: &str = "remote.db";

/// Shared handle to the device store.
pub type Store = Arc<dyn KeyValueStore>;

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<TraceConfig>,
    store: OnceCell<Store>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
            store: OnceCell::new(),
        }
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Whether prompts may be shown.
    pub fn interactive(&self) -> bool {
        !self.cli.no_input && std::io::stdin().is_terminal()
    }

    pub fn no_input(&self) -> bool {
        self.cli.no_input
    }

    /// Get the config, loading it lazily if needed.
    pub fn config(&self) -> anyhow::Result<&TraceConfig> {
        self.config.get_or_try_init(|| match resolve_config_path(self.cli)? {
            Some(path) => {
                debug!(path = %path.display(), "loading config");
                read_config(&path)
            }
            None => Ok(TraceConfig::default()),
        })
    }

    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        resolve_data_dir(self.cli, self.config()?)
    }

    /// Selected backend: flag (or env), then config.
    pub fn backend_kind(&self) -> anyhow::Result<BackendKind> {
        match self.cli.backend {
            Some(arg) => Ok(arg.into()),
            None => Ok(self.config()?.storage.backend),
        }
    }

    /// Database standing in for the hosted auth and data services.
    pub fn remote_database(&self) -> anyhow::Result<PathBuf> {
        match self
            .config()?
            .remote
            .database
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(self.data_dir()?.join(REMOTE_DATABASE_FILE)),
        }
    }

    pub fn debounce_ms(&self) -> anyhow::Result<i64> {
        Ok(self.config()?.editor.debounce_ms.max(0))
    }

    /// Get the configured editor override, if any.
    pub fn editor_command(&self) -> anyhow::Result<Option<&str>> {
        Ok(self.config()?.editor.command.as_deref())
    }

    /// The device key-value store, opened on first use.
    pub fn store(&self) -> anyhow::Result<Store> {
        let store = self.store.get_or_try_init(|| -> anyhow::Result<Store> {
            let dir = self.data_dir()?;
            let store: Store = match self.config()?.storage.local_store {
                LocalStoreKind::File => Arc::new(FileStore::new(dir)),
                LocalStoreKind::Sqlite => {
                    Arc::new(SqliteStore::open(&dir.join(SQLITE_STORE_FILE))?)
                }
            };
            Ok(store)
        })?;
        Ok(store.clone())
    }

    /// Stored theme; unreadable stores fall back to light.
    pub fn palette(&self) -> ThemeMode {
        self.store()
            .ok()
            .and_then(|store| ThemeMode::load(&store).ok())
            .unwrap_or_default()
    }

    /// UI context for the current invocation.
    pub fn ui_context(&self, json: bool) -> UiContext {
        UiContext::from_env(json, self.cli.no_color, self.palette())
    }
}
