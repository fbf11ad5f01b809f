//! Portable JSON import/export.
//!
//! The export format is a pretty-printed JSON array of entries using the
//! field names of [`Entry`]. Import is lenient: anything that is not a JSON
//! array yields nothing, and elements without a usable date are skipped.

use chrono::Utc;
use tracing::{debug, warn};

use crate::entry::{sort_entries, Entry};
use crate::error::Result;

/// Prefix of export file names.
pub const EXPORT_FILE_PREFIX: &str = "trace-entries";

/// Parse an import payload, stamping entries without an update time with now.
pub fn parse_entries_json(text: &str) -> Vec<Entry> {
    parse_entries_json_at(text, Utc::now().timestamp_millis())
}

/// Parse an import payload, using `now_millis` as the default update time.
pub fn parse_entries_json_at(text: &str, now_millis: i64) -> Vec<Entry> {
    let raw: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, "entries payload is not valid JSON");
            return Vec::new();
        }
    };

    let Some(items) = raw.as_array() else {
        warn!("entries payload is not a JSON array");
        return Vec::new();
    };

    let entries: Vec<Entry> = items
        .iter()
        .filter_map(|item| Entry::from_value(item, now_millis))
        .collect();
    if entries.len() != items.len() {
        debug!(
            skipped = items.len() - entries.len(),
            "dropped elements without a usable date"
        );
    }
    entries
}

/// Serialize entries (sorted by date) as an indented JSON array.
pub fn export_entries_json(entries: &[Entry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&sort_entries(entries))?)
}

/// File name for an export made on `date_iso`.
pub fn export_filename(date_iso: &str) -> String {
    format!("{}-{}.json", EXPORT_FILE_PREFIX, date_iso)
}
