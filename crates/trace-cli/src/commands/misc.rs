use clap::CommandFactory;
use clap_complete::generate;
use trace_core::theme::ThemeMode;

use crate::app::AppContext;
use crate::cli::{Cli, ThemeArg, ThemeArgs};
use crate::ui::theme::toggle_label;
use crate::ui::{hint, kv, print, receipt};

pub fn handle_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "trace", &mut std::io::stdout());
    Ok(())
}

/// Show the stored theme, or store a new one.
pub fn handle_theme(ctx: &AppContext, args: &ThemeArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let current = ThemeMode::load(&store)?;

    let Some(requested) = args.mode else {
        let ui = ctx.ui_context(false);
        if ctx.quiet() {
            println!("{}", current);
        } else {
            print(&ui, &kv(&ui, "Theme", current.as_str()));
            print(
                &ui,
                &hint(
                    &ui,
                    &format!("{}: run `trace theme toggle`.", toggle_label(current)),
                ),
            );
        }
        return Ok(());
    };

    let next = match requested {
        ThemeArg::Light => ThemeMode::Light,
        ThemeArg::Dark => ThemeMode::Dark,
        ThemeArg::Toggle => current.toggle(),
    };
    next.save(&store)?;

    let ui = ctx.ui_context(false);
    if !ctx.quiet() {
        print(&ui, &receipt(&ui, "Theme updated", &[("Theme", next.as_str())]));
    }
    Ok(())
}
