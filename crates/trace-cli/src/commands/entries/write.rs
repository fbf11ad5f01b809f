use crate::app::{open_journal, AppContext};
use crate::cli::WriteArgs;
use crate::errors::CliError;
use crate::helpers::{parse_date, read_entry_body};
use crate::ui::format::format_millis;
use crate::ui::{badge, print, receipt, Badge};

pub fn handle_write(ctx: &AppContext, args: &WriteArgs) -> anyhow::Result<()> {
    let date = args.date.as_deref().map(parse_date).transpose()?;
    let ui = ctx.ui_context(false);
    let mut journal = open_journal(ctx, &ui)?;
    let editor = &mut journal.editor;

    if let Some(date) = &date {
        editor.activate(date);
    }
    if let Some(title) = &args.title {
        editor.set_title(title);
    }
    let body = read_entry_body(
        ctx.no_input(),
        args.body.clone(),
        ctx.editor_command()?,
        &editor.draft().body,
    )?;
    if let Some(body) = body {
        editor.set_body(&body);
    }

    if !editor.flush() {
        if !editor.draft().has_content() {
            return Err(CliError::invalid_input(
                "Nothing to save: an entry needs a title or a body.",
            )
            .into());
        }
        if !ctx.quiet() {
            print(&ui, &badge(&ui, Badge::Info, "No changes."));
        }
        return Ok(());
    }
    if editor.status().is_failure() {
        return Err(anyhow::anyhow!(
            "{}: the entry for {} was not saved",
            editor.status(),
            editor.active_date()
        ));
    }

    if !ctx.quiet() {
        let draft = editor.draft();
        let updated = format_millis(draft.updated_at, ui.mode.is_pretty());
        print(
            &ui,
            &receipt(
                &ui,
                "Entry saved",
                &[
                    ("Date", draft.date_iso.as_str()),
                    ("Title", draft.display_title()),
                    ("Updated", updated.as_str()),
                ],
            ),
        );
    }
    Ok(())
}
