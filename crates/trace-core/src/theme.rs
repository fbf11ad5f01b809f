//! Light/dark preference stored under [`keys::THEME`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TraceError};
use crate::kv::{keys, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Stored preference; anything other than `"dark"` reads as light.
    pub fn load<K: KeyValueStore>(store: &K) -> Result<Self> {
        Ok(match store.get(keys::THEME)?.as_deref() {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        })
    }

    pub fn save<K: KeyValueStore>(self, store: &K) -> Result<()> {
        store.set(keys::THEME, self.as_str())
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = TraceError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(TraceError::InvalidInput(format!(
                "Unknown theme: {} (use light or dark)",
                other
            ))),
        }
    }
}
