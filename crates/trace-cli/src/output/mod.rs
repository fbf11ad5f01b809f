//! Output formatting helpers for the CLI.
//!
//! JSON output uses the same field names as the export format, so
//! `trace list --json` can be fed back to `trace import`.

use trace_core::Entry;

use crate::ui::format::format_millis;
use crate::ui::{single_line, truncate, UiContext};

const TITLE_WIDTH: usize = 48;

/// Convert an entry to JSON for output.
pub fn entry_json(entry: &Entry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id,
        "dateISO": entry.date_iso,
        "title": entry.title,
        "body": entry.body,
        "updatedAt": entry.updated_at,
    })
}

/// Convert multiple entries to JSON array for output.
pub fn entries_json(entries: &[Entry]) -> Vec<serde_json::Value> {
    entries.iter().map(entry_json).collect()
}

/// Table row for a listing: date, title, last update.
pub fn entry_row(ctx: &UiContext, entry: &Entry) -> Vec<String> {
    vec![
        entry.date_iso.clone(),
        truncate(&single_line(entry.display_title()), TITLE_WIDTH),
        format_millis(entry.updated_at, ctx.mode.is_pretty()),
    ]
}
