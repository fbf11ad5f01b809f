//! Time source abstraction.
//!
//! Timestamps are milliseconds since the Unix epoch, matching the
//! `updatedAt` field of exported entries.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock {
    fn now_millis(&self) -> i64;

    /// Current calendar date (UTC) as `YYYY-MM-DD`.
    fn today_iso(&self) -> String {
        date_iso_from_millis(self.now_millis())
    }
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// UTC calendar date for a millisecond timestamp.
pub fn date_iso_from_millis(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

/// RFC 3339 rendering of a millisecond timestamp, as used on the wire.
pub fn millis_to_rfc3339(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Parse an RFC 3339 / ISO-8601 timestamp into milliseconds.
pub fn parse_timestamp_millis(value: &str) -> Option<i64> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(1_000);
        let other = clock.clone();
        clock.advance(500);
        assert_eq!(other.now_millis(), 1_500);
        other.set(42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn test_date_iso_from_millis() {
        // 2024-01-05T12:00:00Z
        assert_eq!(date_iso_from_millis(1_704_456_000_000), "2024-01-05");
        assert_eq!(ManualClock::new(0).today_iso(), "1970-01-01");
    }

    #[test]
    fn test_rfc3339_round_trip() {
        let millis = 1_704_456_000_123;
        let text = millis_to_rfc3339(millis);
        assert_eq!(text, "2024-01-05T12:00:00.123Z");
        assert_eq!(parse_timestamp_millis(&text), Some(millis));
        assert_eq!(parse_timestamp_millis("not a date"), None);
    }
}
