//! Entry backends.
//!
//! The `EntryBackend` trait is the single persistence surface the editor
//! talks to. Two implementations exist and are selected at composition time:
//!
//! - [`LocalBackend`]: the whole entry array as JSON in a [`KeyValueStore`]
//! - [`RemoteBackend`]: rows in a [`DataService`] owned by one user
//!
//! Both treat the date as the primary key and the id as a stable secondary
//! identifier: writing an entry for a date that is already stored keeps the
//! stored id.
//!
//! [`KeyValueStore`]: crate::kv::KeyValueStore
//! [`DataService`]: crate::remote::DataService

mod local;
mod remote;

pub use local::LocalBackend;
pub use remote::RemoteBackend;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::Result;

/// Which side of the composition a backend talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[default]
    Local,
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Local => write!(f, "local"),
            BackendKind::Remote => write!(f, "remote"),
        }
    }
}

/// Persistence interface for journal entries.
pub trait EntryBackend {
    fn kind(&self) -> BackendKind;

    /// Every stored entry. Order is unspecified; callers sort for display.
    fn fetch_all(&self) -> Result<Vec<Entry>>;

    /// Store `entry` for its date and return the stored form.
    fn upsert(&self, entry: &Entry) -> Result<Entry>;

    /// Store a batch, later entries winning for a repeated date.
    ///
    /// Returns the stored forms in input order.
    fn upsert_many(&self, entries: &[Entry]) -> Result<Vec<Entry>>;

    /// Remove whatever is stored for `date_iso`.
    fn delete(&self, date_iso: &str) -> Result<()>;
}

impl<T: EntryBackend + ?Sized> EntryBackend for Box<T> {
    fn kind(&self) -> BackendKind {
        (**self).kind()
    }

    fn fetch_all(&self) -> Result<Vec<Entry>> {
        (**self).fetch_all()
    }

    fn upsert(&self, entry: &Entry) -> Result<Entry> {
        (**self).upsert(entry)
    }

    fn upsert_many(&self, entries: &[Entry]) -> Result<Vec<Entry>> {
        (**self).upsert_many(entries)
    }

    fn delete(&self, date_iso: &str) -> Result<()> {
        (**self).delete(date_iso)
    }
}
