use dialoguer::Confirm;
use trace_core::entry::find_by_date;

use crate::app::{open_journal, AppContext};
use crate::cli::DeleteArgs;
use crate::errors::CliError;
use crate::helpers::parse_date;
use crate::ui::{badge, print, receipt, Badge};

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let date = parse_date(&args.date)?;
    let ui = ctx.ui_context(false);
    let mut journal = open_journal(ctx, &ui)?;
    let editor = &mut journal.editor;

    let title = match find_by_date(editor.entries(), &date) {
        Some(entry) => entry.display_title().to_string(),
        None => {
            return Err(CliError::not_found(
                format!("Entry for {} not found", date),
                "Hint: Run `trace list` to see saved dates.",
            )
            .into())
        }
    };

    if !args.yes {
        if !ctx.interactive() {
            return Err(CliError::invalid_input(
                "Refusing to delete without confirmation. Pass --yes.",
            )
            .into());
        }
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the entry for {} ({})?", date, title))
            .default(false)
            .interact()
            .map_err(|e| anyhow::anyhow!("Failed to read confirmation: {}", e))?;
        if !confirmed {
            if !ctx.quiet() {
                print(&ui, &badge(&ui, Badge::Warn, "Cancelled"));
            }
            return Ok(());
        }
    }

    editor.activate(&date);
    if !editor.delete_active() {
        return Err(anyhow::anyhow!("{}: {}", editor.status(), date));
    }

    if !ctx.quiet() {
        print(
            &ui,
            &receipt(
                &ui,
                &editor.status().to_string(),
                &[("Date", date.as_str()), ("Title", title.as_str())],
            ),
        );
    }
    Ok(())
}
