//! Entry backend over a key-value store.

use tracing::{debug, info, warn};

use crate::entry::{merge_entries_by_date, new_entry_id, upsert_entry, Entry};
use crate::error::Result;
use crate::kv::{keys, KeyValueStore};

use super::{BackendKind, EntryBackend};

/// Keeps the entry array as JSON under [`keys::ENTRIES`].
pub struct LocalBackend<K> {
    store: K,
}

impl<K: KeyValueStore> LocalBackend<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Stored entries; empty when nothing is stored or the content cannot be
    /// read as a JSON array. Never fails.
    pub fn load_entries(&self) -> Vec<Entry> {
        self.fetch_all().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read entries; treating store as empty");
            Vec::new()
        })
    }

    /// Replace the stored array with `entries`.
    pub fn save_entries(&self, entries: &[Entry]) -> Result<()> {
        let payload = serde_json::to_string(entries)?;
        debug!(count = entries.len(), "saving entries");
        self.store.set(keys::ENTRIES, &payload)
    }

    /// Give `entry` the id already stored for its date, if there is one.
    ///
    /// An id held by an entry on another date is swapped for a fresh one so
    /// replace-by-id never touches a different date.
    fn adopt_stored_id(stored: &[Entry], entry: &Entry) -> Entry {
        let mut adopted = entry.clone();
        if let Some(existing) = stored.iter().find(|item| item.date_iso == entry.date_iso) {
            adopted.id = existing.id.clone();
        } else if stored.iter().any(|item| item.id == entry.id) {
            debug!(date = %entry.date_iso, "entry id already used on another date");
            adopted.id = new_entry_id();
        }
        adopted
    }
}

impl<K: KeyValueStore> EntryBackend for LocalBackend<K> {
    fn kind(&self) -> BackendKind {
        BackendKind::Local
    }

    fn fetch_all(&self) -> Result<Vec<Entry>> {
        let Some(raw) = self.store.get(keys::ENTRIES)? else {
            return Ok(Vec::new());
        };
        let parsed: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, "stored entries are not valid JSON");
                return Ok(Vec::new());
            }
        };
        let Some(items) = parsed.as_array() else {
            warn!("stored entries are not a JSON array");
            return Ok(Vec::new());
        };

        let now = chrono::Utc::now().timestamp_millis();
        Ok(items
            .iter()
            .filter_map(|item| Entry::from_value(item, now))
            .collect())
    }

    fn upsert(&self, entry: &Entry) -> Result<Entry> {
        let stored = self.fetch_all()?;
        let adopted = Self::adopt_stored_id(&stored, entry);
        let next = upsert_entry(&stored, adopted.clone());
        self.save_entries(&next)?;
        info!(date = %adopted.date_iso, "saved entry");
        Ok(adopted)
    }

    fn upsert_many(&self, entries: &[Entry]) -> Result<Vec<Entry>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let stored = self.fetch_all()?;
        let mut known = stored.clone();
        let mut adopted = Vec::with_capacity(entries.len());
        for entry in entries {
            let item = Self::adopt_stored_id(&known, entry);
            known.push(item.clone());
            adopted.push(item);
        }
        let merged = merge_entries_by_date(&stored, &adopted);
        self.save_entries(&merged)?;
        info!(count = adopted.len(), "saved entries");
        Ok(adopted)
    }

    fn delete(&self, date_iso: &str) -> Result<()> {
        let stored = self.fetch_all()?;
        let remaining: Vec<Entry> = stored
            .into_iter()
            .filter(|entry| entry.date_iso != date_iso)
            .collect();
        self.save_entries(&remaining)?;
        info!(date = %date_iso, "deleted entry");
        Ok(())
    }
}
