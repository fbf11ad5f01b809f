use trace_core::Entry;

use crate::app::{open_journal, AppContext};
use crate::cli::ListArgs;
use crate::output::{entries_json, entry_row};
use crate::ui::{blank_line, header, hint, print, table, Column, UiContext};

const COLUMNS: [Column; 3] = [
    Column::new("DATE"),
    Column::new("TITLE"),
    Column::new("UPDATED"),
];

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let ui_ctx = ctx.ui_context(args.json);
    let journal = open_journal(ctx, &ui_ctx)?;
    let query = args.search.as_deref().unwrap_or("");
    let entries = journal.editor.sidebar(query);
    render_entries(ctx, &ui_ctx, "list", &entries)
}

/// Shared by `list` and `search`: newest first, one row per entry.
pub(super) fn render_entries(
    ctx: &AppContext,
    ui_ctx: &UiContext,
    command: &str,
    entries: &[Entry],
) -> anyhow::Result<()> {
    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entries_json(entries))?);
        return Ok(());
    }

    if entries.is_empty() {
        if !ctx.quiet() {
            print(ui_ctx, &hint(ui_ctx, "No entries found."));
        }
        return Ok(());
    }

    if ctx.quiet() {
        for entry in entries {
            println!("{}", entry.date_iso);
        }
        return Ok(());
    }

    let count = entries.len().to_string();
    print(ui_ctx, &header(ui_ctx, command, Some(&count)));
    blank_line(ui_ctx);
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|entry| entry_row(ui_ctx, entry))
        .collect();
    print(ui_ctx, &table(ui_ctx, &COLUMNS, &rows));
    Ok(())
}
