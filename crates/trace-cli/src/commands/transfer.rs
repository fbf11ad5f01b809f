//! Import and export of the portable JSON format.

use std::path::Path;

use trace_core::editor::EditorStatus;
use trace_core::fs::write_atomic;

use crate::app::{open_journal, AppContext};
use crate::cli::{ExportArgs, ImportArgs};
use crate::errors::CliError;
use crate::helpers::resolve_export_path;
use crate::ui::{print, receipt};

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.file);
    let text = std::fs::read_to_string(path).map_err(|e| {
        CliError::not_found(
            format!("Failed to read {}: {}", path.display(), e),
            "Hint: Pass the path of a file written by `trace export`.",
        )
    })?;

    let ui = ctx.ui_context(false);
    let mut journal = open_journal(ctx, &ui)?;
    let editor = &mut journal.editor;
    let count = editor.import_json(&text);

    match editor.status() {
        EditorStatus::ImportEmpty => {
            Err(CliError::invalid_input(EditorStatus::ImportEmpty.to_string()).into())
        }
        EditorStatus::ImportFailed => Err(anyhow::anyhow!(
            "{}: could not store entries from {}",
            EditorStatus::ImportFailed,
            path.display()
        )),
        status => {
            if !ctx.quiet() {
                let count = count.to_string();
                let file = path.display().to_string();
                print(
                    &ui,
                    &receipt(
                        &ui,
                        &status.to_string(),
                        &[("File", file.as_str()), ("Entries", count.as_str())],
                    ),
                );
            }
            Ok(())
        }
    }
}

pub fn handle_export(ctx: &AppContext, args: &ExportArgs) -> anyhow::Result<()> {
    let ui = ctx.ui_context(false);
    let journal = open_journal(ctx, &ui)?;
    let editor = &journal.editor;
    let payload = editor.export_json()?;

    let cwd = std::env::current_dir()
        .map_err(|e| anyhow::anyhow!("Failed to resolve current directory: {}", e))?;
    let Some(destination) =
        resolve_export_path(args.output.as_deref(), &cwd, &editor.export_filename())
    else {
        println!("{}", payload);
        return Ok(());
    };

    write_atomic(&destination, payload.as_bytes())?;

    if !ctx.quiet() {
        let count = editor.entries().len().to_string();
        let file = destination.display().to_string();
        print(
            &ui,
            &receipt(
                &ui,
                "Exported",
                &[("File", file.as_str()), ("Entries", count.as_str())],
            ),
        );
    }
    Ok(())
}
