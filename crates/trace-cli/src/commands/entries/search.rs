use crate::app::{open_journal, AppContext};
use crate::cli::SearchArgs;
use crate::errors::CliError;

use super::list::render_entries;

pub fn handle_search(ctx: &AppContext, args: &SearchArgs) -> anyhow::Result<()> {
    if args.query.trim().is_empty() {
        return Err(CliError::invalid_input("Search query cannot be empty").into());
    }
    let ui_ctx = ctx.ui_context(args.json);
    let journal = open_journal(ctx, &ui_ctx)?;
    let entries = journal.editor.sidebar(&args.query);
    render_entries(ctx, &ui_ctx, "search", &entries)
}
