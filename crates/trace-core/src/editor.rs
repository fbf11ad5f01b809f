//! Editing session over a single active date.
//!
//! [`EditorCoordinator`] owns the in-memory entry list, the draft for the
//! active date and a [`Debouncer`] that defers persistence until edits pause.
//! Time never advances on its own: callers drive it through [`Clock`] and
//! call [`EditorCoordinator::tick`] (or `flush`) to commit due saves.

use std::fmt;

use tracing::{debug, warn};

use crate::clock::Clock;
use crate::codec::{export_entries_json, export_filename, parse_entries_json_at};
use crate::entry::{entry_matches, find_by_date, merge_entries_by_date, sort_entries, Entry};
use crate::error::Result;
use crate::storage::EntryBackend;

/// Quiet period before an edit is persisted.
pub const DEFAULT_DEBOUNCE_MS: i64 = 500;

/// A save deferred until `due_at`, bound to the date it was scheduled for.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSave {
    date_iso: String,
    due_at: i64,
}

/// Cancellable deferred save keyed by date.
#[derive(Debug, Clone)]
pub struct Debouncer {
    period_ms: i64,
    pending: Option<PendingSave>,
}

impl Debouncer {
    pub fn new(period_ms: i64) -> Self {
        Self {
            period_ms: period_ms.max(0),
            pending: None,
        }
    }

    pub fn period_ms(&self) -> i64 {
        self.period_ms
    }

    /// Arm (or re-arm) the save for `date_iso`, replacing any pending one.
    pub fn schedule(&mut self, date_iso: &str, now_millis: i64) {
        self.pending = Some(PendingSave {
            date_iso: date_iso.to_string(),
            due_at: now_millis + self.period_ms,
        });
    }

    /// Drop the pending save, returning the date it was for.
    pub fn cancel(&mut self) -> Option<String> {
        self.pending.take().map(|pending| pending.date_iso)
    }

    pub fn pending_date(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.date_iso.as_str())
    }

    pub fn deadline(&self) -> Option<i64> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }

    /// Date whose save is due at `now_millis`, without consuming it.
    pub fn due(&self, now_millis: i64) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|pending| now_millis >= pending.due_at)
            .map(|pending| pending.date_iso.as_str())
    }

    /// Consume the pending save if it is due.
    pub fn take_due(&mut self, now_millis: i64) -> Option<String> {
        self.due(now_millis)?;
        self.cancel()
    }
}

/// Status line shown next to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorStatus {
    Saved,
    Saving,
    Deleted,
    ImportEmpty,
    Imported(usize),
    SyncFailed,
    DeleteFailed,
    ImportFailed,
}

impl EditorStatus {
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            EditorStatus::SyncFailed
                | EditorStatus::DeleteFailed
                | EditorStatus::ImportFailed
                | EditorStatus::ImportEmpty
        )
    }
}

impl fmt::Display for EditorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorStatus::Saved => f.write_str("All changes saved"),
            EditorStatus::Saving => f.write_str("Saving..."),
            EditorStatus::Deleted => f.write_str("Entry deleted."),
            EditorStatus::ImportEmpty => f.write_str("Import failed: no entries found."),
            EditorStatus::Imported(1) => f.write_str("Imported 1 entry."),
            EditorStatus::Imported(count) => write!(f, "Imported {} entries.", count),
            EditorStatus::SyncFailed => f.write_str("Sync failed"),
            EditorStatus::DeleteFailed => f.write_str("Delete failed"),
            EditorStatus::ImportFailed => f.write_str("Import failed"),
        }
    }
}

/// Editing state machine over an [`EntryBackend`].
///
/// The in-memory list only changes after the backend confirms a write, so a
/// failed call leaves it exactly as it was.
pub struct EditorCoordinator<B, C> {
    backend: B,
    clock: C,
    entries: Vec<Entry>,
    active_date: String,
    draft: Entry,
    debouncer: Debouncer,
    status: EditorStatus,
}

impl<B: EntryBackend, C: Clock> EditorCoordinator<B, C> {
    /// Load every entry and activate today's date.
    ///
    /// A backend that cannot be read yields an empty list with a
    /// [`EditorStatus::SyncFailed`] status.
    pub fn open(backend: B, clock: C, debounce_ms: i64) -> Self {
        let (entries, status) = match backend.fetch_all() {
            Ok(entries) => (entries, EditorStatus::Saved),
            Err(err) => {
                warn!(error = %err, backend = %backend.kind(), "failed to load entries");
                (Vec::new(), EditorStatus::SyncFailed)
            }
        };
        let today = clock.today_iso();
        let mut editor = Self {
            draft: Entry::draft(today.as_str(), clock.now_millis()),
            active_date: today,
            backend,
            clock,
            entries,
            debouncer: Debouncer::new(debounce_ms),
            status,
        };
        editor.reset_draft();
        editor
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn sorted_entries(&self) -> Vec<Entry> {
        sort_entries(&self.entries)
    }

    pub fn active_date(&self) -> &str {
        &self.active_date
    }

    pub fn draft(&self) -> &Entry {
        &self.draft
    }

    pub fn status(&self) -> EditorStatus {
        self.status
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.pending_date().is_some()
    }

    pub fn save_deadline(&self) -> Option<i64> {
        self.debouncer.deadline()
    }

    /// Make `date_iso` the active date.
    ///
    /// Any pending save for the previous date is dropped. Activating the
    /// date that is already active changes nothing.
    pub fn activate(&mut self, date_iso: &str) {
        if date_iso.is_empty() || date_iso == self.active_date {
            return;
        }
        if let Some(dropped) = self.debouncer.cancel() {
            debug!(date = %dropped, "dropped pending save on date change");
        }
        self.active_date = date_iso.to_string();
        self.reset_draft();
        self.status = EditorStatus::Saved;
    }

    pub fn set_title(&mut self, title: &str) {
        self.draft.title = title.to_string();
        self.after_edit();
    }

    pub fn set_body(&mut self, body: &str) {
        self.draft.body = body.to_string();
        self.after_edit();
    }

    /// Commit the pending save if its quiet period has elapsed.
    ///
    /// Returns whether a write was attempted.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_millis();
        match self.debouncer.take_due(now) {
            Some(date) if date == self.active_date => {
                self.commit_draft();
                true
            }
            Some(date) => {
                debug!(date = %date, "discarding save for inactive date");
                false
            }
            None => false,
        }
    }

    /// Commit the pending save immediately, if there is one.
    pub fn flush(&mut self) -> bool {
        match self.debouncer.cancel() {
            Some(date) if date == self.active_date => {
                self.commit_draft();
                true
            }
            _ => false,
        }
    }

    /// Persist the draft now, whether or not a save is pending.
    ///
    /// Empty drafts are never written.
    pub fn save_now(&mut self) -> bool {
        self.debouncer.cancel();
        if !self.draft.has_content() {
            self.status = EditorStatus::Saved;
            return false;
        }
        self.commit_draft();
        true
    }

    /// Drop any pending save without writing it.
    pub fn teardown(&mut self) {
        self.debouncer.cancel();
    }

    /// Position of the active date in the sorted list.
    pub fn active_index(&self) -> Option<usize> {
        self.position_in(&self.sorted_entries())
    }

    fn position_in(&self, sorted: &[Entry]) -> Option<usize> {
        sorted
            .iter()
            .position(|entry| entry.date_iso == self.active_date)
    }

    pub fn can_prev(&self) -> bool {
        matches!(self.active_index(), Some(index) if index > 0)
    }

    pub fn can_next(&self) -> bool {
        let sorted = self.sorted_entries();
        matches!(self.position_in(&sorted), Some(index) if index + 1 < sorted.len())
    }

    /// Move to the previous stored entry. Returns `false` at the boundary.
    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    /// Move to the next stored entry. Returns `false` at the boundary.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    fn step(&mut self, offset: isize) -> bool {
        let sorted = self.sorted_entries();
        let Some(index) = self.position_in(&sorted) else {
            return false;
        };
        let Some(target) = index
            .checked_add_signed(offset)
            .and_then(|target| sorted.get(target))
        else {
            return false;
        };
        let date = target.date_iso.clone();
        self.activate(&date);
        true
    }

    /// Delete the active date's entry and reset the draft.
    pub fn delete_active(&mut self) -> bool {
        let date = self.active_date.clone();
        match self.backend.delete(&date) {
            Ok(()) => {
                self.debouncer.cancel();
                self.entries.retain(|entry| entry.date_iso != date);
                self.draft = Entry::draft(date, self.clock.now_millis());
                self.status = EditorStatus::Deleted;
                true
            }
            Err(err) => {
                warn!(error = %err, date = %date, "delete failed");
                self.status = EditorStatus::DeleteFailed;
                false
            }
        }
    }

    /// Entries matching `query`, newest first.
    pub fn sidebar(&self, query: &str) -> Vec<Entry> {
        let mut listed: Vec<Entry> = self
            .sorted_entries()
            .into_iter()
            .filter(|entry| entry_matches(entry, query))
            .collect();
        listed.reverse();
        listed
    }

    /// Import a JSON payload, merging it into the list by date.
    ///
    /// Returns the number of imported entries.
    pub fn import_json(&mut self, text: &str) -> usize {
        let imported = parse_entries_json_at(text, self.clock.now_millis());
        if imported.is_empty() {
            self.status = EditorStatus::ImportEmpty;
            return 0;
        }
        match self.backend.upsert_many(&imported) {
            Ok(stored) => {
                self.entries = merge_entries_by_date(&self.entries, &stored);
                if stored.iter().any(|entry| entry.date_iso == self.active_date) {
                    self.debouncer.cancel();
                    self.reset_draft();
                }
                self.status = EditorStatus::Imported(imported.len());
                imported.len()
            }
            Err(err) => {
                warn!(error = %err, "import failed");
                self.status = EditorStatus::ImportFailed;
                0
            }
        }
    }

    /// Sorted entries as an indented JSON array.
    pub fn export_json(&self) -> Result<String> {
        export_entries_json(&self.entries)
    }

    /// File name for an export made today.
    pub fn export_filename(&self) -> String {
        export_filename(&self.clock.today_iso())
    }

    fn after_edit(&mut self) {
        if self.draft.has_content() {
            self.status = EditorStatus::Saving;
            let now = self.clock.now_millis();
            self.debouncer.schedule(&self.active_date, now);
        } else {
            self.debouncer.cancel();
            self.status = EditorStatus::Saved;
        }
    }

    fn reset_draft(&mut self) {
        self.draft = match find_by_date(&self.entries, &self.active_date) {
            Some(existing) => existing.clone(),
            None => Entry::draft(self.active_date.clone(), self.clock.now_millis()),
        };
    }

    fn commit_draft(&mut self) {
        let mut next = self.draft.clone();
        next.updated_at = self.clock.now_millis();
        match self.backend.upsert(&next) {
            Ok(stored) => {
                self.entries =
                    merge_entries_by_date(&self.entries, std::slice::from_ref(&stored));
                self.draft = stored;
                self.status = EditorStatus::Saved;
            }
            Err(err) => {
                warn!(error = %err, date = %next.date_iso, "save failed");
                self.status = EditorStatus::SyncFailed;
            }
        }
    }
}
