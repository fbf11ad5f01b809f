//! Journal entry model and the pure operations over entry sequences.
//!
//! A store may briefly hold more than one entry for a date (for example a
//! legacy array written by an older build); display and navigation always
//! treat the date as the key, and [`merge_entries_by_date`] collapses
//! duplicates.

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::parse_timestamp_millis;

/// Length of a `YYYY-MM-DD` date.
pub const DATE_ISO_LEN: usize = 10;

/// Field holding the date in current exports.
const DATE_FIELD: &str = "dateISO";
/// Field holding the date in older exports.
const LEGACY_DATE_FIELD: &str = "date";

/// One journal record for a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable identifier, unique within a store
    pub id: String,

    /// Calendar date, `YYYY-MM-DD`
    #[serde(rename = "dateISO")]
    pub date_iso: String,

    pub title: String,

    pub body: String,

    /// Last modification, milliseconds since the Unix epoch
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

impl Entry {
    /// Empty, unsaved entry for `date_iso`.
    pub fn draft(date_iso: impl Into<String>, now_millis: i64) -> Self {
        Self {
            id: new_entry_id(),
            date_iso: truncate_date(&date_iso.into()),
            title: String::new(),
            body: String::new(),
            updated_at: now_millis,
        }
    }

    /// Whether the entry carries anything worth persisting.
    pub fn has_content(&self) -> bool {
        !self.title.trim().is_empty() || !self.body.trim().is_empty()
    }

    /// Title for listings.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }

    /// Build an entry from loosely-typed JSON.
    ///
    /// Accepts the date under `dateISO` or the legacy `date`, and the update
    /// time as milliseconds or an ISO-8601 string under `updatedAt` (or
    /// `updated_at`). Returns `None` when no usable date is present.
    pub fn from_value(value: &serde_json::Value, now_millis: i64) -> Option<Self> {
        let object = value.as_object()?;

        let date_iso = [DATE_FIELD, LEGACY_DATE_FIELD]
            .iter()
            .filter_map(|field| object.get(*field).and_then(|v| v.as_str()))
            .find(|date| !date.is_empty())
            .map(truncate_date)?;

        let text = |field: &str| {
            object
                .get(field)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        let updated_at = ["updatedAt", "updated_at"]
            .iter()
            .filter_map(|field| object.get(*field))
            .find_map(timestamp_from_value)
            .unwrap_or(now_millis);

        let id = object
            .get("id")
            .and_then(|v| v.as_str())
            .filter(|id| !id.is_empty())
            .map(String::from)
            .unwrap_or_else(new_entry_id);

        Some(Self {
            id,
            date_iso,
            title: text("title"),
            body: text("body"),
            updated_at,
        })
    }
}

/// Fresh unique identifier for an entry.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

/// Cut a date or timestamp string down to its `YYYY-MM-DD` prefix.
pub fn truncate_date(value: &str) -> String {
    value.chars().take(DATE_ISO_LEN).collect()
}

fn timestamp_from_value(value: &serde_json::Value) -> Option<i64> {
    if let Some(millis) = value.as_i64() {
        return Some(millis);
    }
    if let Some(millis) = value.as_f64() {
        return millis.is_finite().then_some(millis as i64);
    }
    let text = value.as_str()?;
    parse_timestamp_millis(text).or_else(|| {
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive).timestamp_millis())
    })
}

/// Replace the entry with the same id, or append it.
pub fn upsert_entry(entries: &[Entry], entry: Entry) -> Vec<Entry> {
    let mut next = entries.to_vec();
    match next.iter().position(|item| item.id == entry.id) {
        Some(index) => next[index] = entry,
        None => next.push(entry),
    }
    next
}

/// Merge `incoming` into `entries` keyed by date.
///
/// Dates keep the position of their first appearance; for each date the last
/// supplied entry wins, with `incoming` applied after `entries`. The result
/// holds at most one entry per date.
pub fn merge_entries_by_date(entries: &[Entry], incoming: &[Entry]) -> Vec<Entry> {
    let mut merged: Vec<Entry> = Vec::with_capacity(entries.len() + incoming.len());
    let mut index_by_date: HashMap<String, usize> = HashMap::new();

    for entry in entries.iter().chain(incoming.iter()) {
        match index_by_date.get(&entry.date_iso) {
            Some(&index) => merged[index] = entry.clone(),
            None => {
                index_by_date.insert(entry.date_iso.clone(), merged.len());
                merged.push(entry.clone());
            }
        }
    }

    merged
}

/// Stable ascending sort by date.
pub fn sort_entries(entries: &[Entry]) -> Vec<Entry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| a.date_iso.cmp(&b.date_iso));
    sorted
}

/// Case-insensitive substring match against title, body, or date.
///
/// A blank query matches everything.
pub fn entry_matches(entry: &Entry, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    entry.title.to_lowercase().contains(&needle)
        || entry.body.to_lowercase().contains(&needle)
        || entry.date_iso.contains(&needle)
}

/// First entry stored for `date_iso`.
pub fn find_by_date<'a>(entries: &'a [Entry], date_iso: &str) -> Option<&'a Entry> {
    entries.iter().find(|entry| entry.date_iso == date_iso)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(id: &str, date: &str, title: &str) -> Entry {
        Entry {
            id: id.to_string(),
            date_iso: date.to_string(),
            title: title.to_string(),
            body: String::new(),
            updated_at: 0,
        }
    }

    #[test]
    fn test_serializes_with_export_field_names() {
        let value = serde_json::to_value(entry("a", "2024-01-05", "Trip")).unwrap();
        assert_eq!(
            value,
            json!({"id": "a", "dateISO": "2024-01-05", "title": "Trip", "body": "", "updatedAt": 0})
        );
    }

    #[test]
    fn test_from_value_truncates_timestamp_dates() {
        let parsed = Entry::from_value(&json!({"dateISO": "2024-03-01T09:30:00Z"}), 7).unwrap();
        assert_eq!(parsed.date_iso, "2024-03-01");
        assert_eq!(parsed.updated_at, 7);
        assert!(!parsed.id.is_empty());
        assert_eq!(parsed.title, "");
    }

    #[test]
    fn test_from_value_accepts_legacy_date_and_iso_update_time() {
        let parsed = Entry::from_value(
            &json!({"id": "x", "date": "2024-01-05", "updatedAt": "2024-01-05T12:00:00Z"}),
            0,
        )
        .unwrap();
        assert_eq!(parsed.id, "x");
        assert_eq!(parsed.date_iso, "2024-01-05");
        assert_eq!(parsed.updated_at, 1_704_456_000_000);
    }

    #[test]
    fn test_from_value_rejects_missing_or_non_string_date() {
        assert!(Entry::from_value(&json!({"title": "no date"}), 0).is_none());
        assert!(Entry::from_value(&json!({"dateISO": 20240105}), 0).is_none());
        assert!(Entry::from_value(&json!({"dateISO": ""}), 0).is_none());
        assert!(Entry::from_value(&json!("2024-01-05"), 0).is_none());
    }

    #[test]
    fn test_from_value_ignores_wrong_typed_text_fields() {
        let parsed =
            Entry::from_value(&json!({"dateISO": "2024-01-05", "title": 3, "body": null}), 0)
                .unwrap();
        assert_eq!(parsed.title, "");
        assert_eq!(parsed.body, "");
    }

    #[test]
    fn test_has_content_ignores_whitespace() {
        let mut draft = Entry::draft("2024-03-01", 0);
        assert!(!draft.has_content());
        draft.body = "   \n".to_string();
        assert!(!draft.has_content());
        draft.title = "Hi".to_string();
        assert!(draft.has_content());
    }

    #[test]
    fn test_upsert_replaces_by_id_and_appends_new() {
        let entries = vec![entry("a", "2024-01-01", "one"), entry("b", "2024-01-02", "two")];

        let replaced = upsert_entry(&entries, entry("a", "2024-01-01", "uno"));
        assert_eq!(replaced.len(), 2);
        assert_eq!(replaced[0].title, "uno");
        assert_eq!(replaced[1].id, "b");

        let appended = upsert_entry(&entries, entry("c", "2024-01-01", "dup date"));
        assert_eq!(appended.len(), 3);
        assert_eq!(appended[2].id, "c");
    }

    #[test]
    fn test_merge_incoming_wins_per_date() {
        let local = vec![entry("a", "2024-01-01", "local"), entry("b", "2024-01-02", "keep")];
        let incoming = vec![entry("z", "2024-01-01", "imported"), entry("c", "2024-01-03", "new")];

        let merged = merge_entries_by_date(&local, &incoming);
        let summary: Vec<_> = merged
            .iter()
            .map(|e| (e.date_iso.as_str(), e.title.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("2024-01-01", "imported"),
                ("2024-01-02", "keep"),
                ("2024-01-03", "new"),
            ]
        );
    }

    #[test]
    fn test_merge_last_incoming_wins_and_dedupes_existing() {
        let local = vec![entry("a", "2024-01-01", "first"), entry("b", "2024-01-01", "second")];
        let incoming = vec![entry("c", "2024-01-02", "x"), entry("d", "2024-01-02", "y")];

        let merged = merge_entries_by_date(&local, &incoming);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "b");
        assert_eq!(merged[1].id, "d");
    }

    #[test]
    fn test_merge_with_self_is_idempotent() {
        let entries = vec![entry("a", "2024-01-02", "two"), entry("b", "2024-01-01", "one")];
        assert_eq!(merge_entries_by_date(&entries, &entries), entries);
    }

    #[test]
    fn test_sort_is_stable_for_shared_dates() {
        let entries = vec![
            entry("late", "2024-02-01", ""),
            entry("first", "2024-01-01", ""),
            entry("second", "2024-01-01", ""),
        ];
        let ids: Vec<_> = sort_entries(&entries).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["first", "second", "late"]);
    }

    #[test]
    fn test_entry_matches() {
        let mut e = entry("a", "2024-01-05", "Road Trip");
        e.body = "Drove to the COAST".to_string();

        assert!(entry_matches(&e, ""));
        assert!(entry_matches(&e, "   "));
        assert!(entry_matches(&e, "trip"));
        assert!(entry_matches(&e, "  coast "));
        assert!(entry_matches(&e, "2024-01"));
        assert!(!entry_matches(&e, "mountain"));
    }

    #[test]
    fn test_display_title_defaults_to_untitled() {
        assert_eq!(entry("a", "2024-01-05", "").display_title(), "Untitled");
        assert_eq!(entry("a", "2024-01-05", "Hi").display_title(), "Hi");
    }
}
