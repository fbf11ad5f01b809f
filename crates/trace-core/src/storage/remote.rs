//! Entry backend over the remote data service.

use tracing::{debug, info};

use crate::entry::Entry;
use crate::error::{Result, TraceError};
use crate::remote::{DataService, EntryRecord};

use super::{BackendKind, EntryBackend};

/// Entries owned by one signed-in user of a [`DataService`].
pub struct RemoteBackend<S> {
    service: S,
    user_id: String,
}

impl<S: DataService> RemoteBackend<S> {
    pub fn new(service: S, user_id: impl Into<String>) -> Self {
        Self {
            service,
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl<S: DataService> EntryBackend for RemoteBackend<S> {
    fn kind(&self) -> BackendKind {
        BackendKind::Remote
    }

    fn fetch_all(&self) -> Result<Vec<Entry>> {
        let records = self.service.select_by_owner(&self.user_id)?;
        debug!(count = records.len(), "fetched remote entries");
        Ok(records.into_iter().map(EntryRecord::into_entry).collect())
    }

    fn upsert(&self, entry: &Entry) -> Result<Entry> {
        let record = EntryRecord::from_entry(&self.user_id, entry);
        let stored = self
            .service
            .upsert(std::slice::from_ref(&record))?
            .into_iter()
            .next()
            .ok_or_else(|| TraceError::Remote("Upsert returned no rows".to_string()))?;
        info!(date = %stored.date, "synced entry");
        Ok(stored.into_entry())
    }

    fn upsert_many(&self, entries: &[Entry]) -> Result<Vec<Entry>> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }
        let records: Vec<EntryRecord> = entries
            .iter()
            .map(|entry| EntryRecord::from_entry(&self.user_id, entry))
            .collect();
        let stored = self.service.upsert(&records)?;
        info!(count = stored.len(), "synced entries");
        Ok(stored.into_iter().map(EntryRecord::into_entry).collect())
    }

    fn delete(&self, date_iso: &str) -> Result<()> {
        self.service.delete(&self.user_id, date_iso)?;
        info!(date = %date_iso, "deleted remote entry");
        Ok(())
    }
}
