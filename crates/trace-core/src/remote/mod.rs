//! Relational data service contract and its wire records.
//!
//! The service keeps one table of entries keyed by `(user_id, date)`. Field
//! names are snake_case and timestamps are RFC 3339 strings on the wire;
//! [`EntryRecord`] translates to and from [`Entry`] at this boundary.

mod sqlite;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::clock::{millis_to_rfc3339, parse_timestamp_millis};
use crate::entry::Entry;
use crate::error::Result;

pub use sqlite::SqliteDataService;

/// A row of the remote `entries` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub title: String,
    pub body: String,
    pub updated_at: String,
}

impl EntryRecord {
    /// Wire form of `entry` owned by `user_id`.
    pub fn from_entry(user_id: &str, entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            user_id: user_id.to_string(),
            date: entry.date_iso.clone(),
            title: entry.title.clone(),
            body: entry.body.clone(),
            updated_at: millis_to_rfc3339(entry.updated_at),
        }
    }

    /// Domain form of this record. An unparseable `updated_at` reads as now.
    pub fn into_entry(self) -> Entry {
        let updated_at = parse_timestamp_millis(&self.updated_at)
            .filter(|millis| *millis != 0)
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        Entry {
            id: self.id,
            date_iso: self.date,
            title: self.title,
            body: self.body,
            updated_at,
        }
    }
}

/// Operations the remote data service offers.
///
/// Each call is one request/response round trip; failures surface as
/// [`crate::TraceError::Remote`].
pub trait DataService {
    /// Every record owned by `user_id`, ordered by date ascending.
    fn select_by_owner(&self, user_id: &str) -> Result<Vec<EntryRecord>>;

    /// Insert or update records, resolving conflicts on `(user_id, date)`.
    ///
    /// A conflicting row keeps its id and takes the incoming title, body and
    /// update time. Returns the stored rows in input order.
    fn upsert(&self, records: &[EntryRecord]) -> Result<Vec<EntryRecord>>;

    /// Delete the record for `(user_id, date)`, if any.
    fn delete(&self, user_id: &str, date: &str) -> Result<()>;
}

impl<T: DataService + ?Sized> DataService for &T {
    fn select_by_owner(&self, user_id: &str) -> Result<Vec<EntryRecord>> {
        (**self).select_by_owner(user_id)
    }

    fn upsert(&self, records: &[EntryRecord]) -> Result<Vec<EntryRecord>> {
        (**self).upsert(records)
    }

    fn delete(&self, user_id: &str, date: &str) -> Result<()> {
        (**self).delete(user_id, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_translation_round_trips() {
        let entry = Entry {
            id: "e1".to_string(),
            date_iso: "2024-01-05".to_string(),
            title: "Trip".to_string(),
            body: "Notes".to_string(),
            updated_at: 1_704_456_000_123,
        };

        let record = EntryRecord::from_entry("user-1", &entry);
        assert_eq!(record.user_id, "user-1");
        assert_eq!(record.date, "2024-01-05");
        assert_eq!(record.updated_at, "2024-01-05T12:00:00.123Z");
        assert_eq!(record.into_entry(), entry);
    }

    #[test]
    fn test_bad_timestamp_falls_back_to_now() {
        let before = Utc::now().timestamp_millis();
        let entry = EntryRecord {
            id: "e1".to_string(),
            user_id: "u".to_string(),
            date: "2024-01-05".to_string(),
            title: String::new(),
            body: String::new(),
            updated_at: "yesterday-ish".to_string(),
        }
        .into_entry();
        assert!(entry.updated_at >= before);
    }

    #[test]
    fn test_wire_field_names_are_snake_case() {
        let record = EntryRecord::from_entry("u", &Entry::draft("2024-01-05", 0));
        let value = serde_json::to_value(record).unwrap();
        assert!(value.get("user_id").is_some());
        assert!(value.get("updated_at").is_some());
        assert!(value.get("dateISO").is_none());
    }
}
