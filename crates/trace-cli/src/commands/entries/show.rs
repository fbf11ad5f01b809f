use trace_core::Entry;

use crate::app::{open_journal, AppContext};
use crate::cli::ShowArgs;
use crate::errors::CliError;
use crate::helpers::parse_date;
use crate::output::entry_json;
use crate::ui::format::format_millis;
use crate::ui::{blank_line, divider, header, kv, print, OutputMode};

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let ui_ctx = ctx.ui_context(args.json);
    let mut journal = open_journal(ctx, &ui_ctx)?;
    let editor = &mut journal.editor;

    if let Some(date) = &date {
        editor.activate(date);
    }
    if args.prev || args.next {
        let moved = if args.prev {
            editor.prev()
        } else {
            editor.next()
        };
        if !moved {
            let sorted = editor.sorted_entries();
            let neighbor = neighbor_of(&sorted, editor.active_date(), args.prev)
                .map(|entry| entry.date_iso.clone());
            match neighbor {
                Some(date) => editor.activate(&date),
                None => {
                    let direction = if args.prev { "before" } else { "after" };
                    return Err(CliError::not_found(
                        format!("No entry {} {}", direction, editor.active_date()),
                        "Hint: Run `trace list` to see saved dates.",
                    )
                    .into());
                }
            }
        }
    }

    let entry = editor.draft().clone();
    if !entry.has_content() {
        return Err(CliError::not_found(
            format!("Entry for {} not found", entry.date_iso),
            "Hint: Run `trace list` to see saved dates.",
        )
        .into());
    }

    if ui_ctx.mode.is_json() {
        println!("{}", serde_json::to_string_pretty(&entry_json(&entry))?);
        return Ok(());
    }

    match ui_ctx.mode {
        OutputMode::Pretty => {
            if !ctx.quiet() {
                print(&ui_ctx, &header(&ui_ctx, "show", Some(&entry.date_iso)));
                blank_line(&ui_ctx);
                print(&ui_ctx, &kv(&ui_ctx, "Title", entry.display_title()));
                print(
                    &ui_ctx,
                    &kv(&ui_ctx, "Updated", &format_millis(entry.updated_at, true)),
                );
                blank_line(&ui_ctx);
                print(&ui_ctx, &divider(&ui_ctx));
                blank_line(&ui_ctx);
            }
            println!("{}", entry.body);
        }
        OutputMode::Plain | OutputMode::Json => {
            if !ctx.quiet() {
                println!("date={}", entry.date_iso);
                println!("title={}", entry.title);
                println!("updated_at={}", format_millis(entry.updated_at, false));
            }
            println!("{}", entry.body);
        }
    }

    Ok(())
}

/// Closest stored entry strictly before (or after) a date that has none.
fn neighbor_of<'a>(sorted: &'a [Entry], date_iso: &str, before: bool) -> Option<&'a Entry> {
    if before {
        sorted
            .iter()
            .rev()
            .find(|entry| entry.date_iso.as_str() < date_iso)
    } else {
        sorted
            .iter()
            .find(|entry| entry.date_iso.as_str() > date_iso)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str) -> Entry {
        Entry::draft(date, 0)
    }

    #[test]
    fn test_neighbor_of_gap_date() {
        let sorted = vec![entry("2024-01-05"), entry("2024-02-10"), entry("2024-03-01")];
        assert_eq!(
            neighbor_of(&sorted, "2024-02-01", true).map(|e| e.date_iso.as_str()),
            Some("2024-01-05")
        );
        assert_eq!(
            neighbor_of(&sorted, "2024-02-01", false).map(|e| e.date_iso.as_str()),
            Some("2024-02-10")
        );
        assert!(neighbor_of(&sorted, "2024-01-01", true).is_none());
        assert!(neighbor_of(&sorted, "2024-04-01", false).is_none());
    }
}
